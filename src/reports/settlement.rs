//! Settlement
//!
//! Turns "who paid what" records into the requesting user's signed net
//! position. Positive amounts are owed to the user, negative amounts are
//! owed by the user.
//!
//! Group expenses are split equally in whole cents across the group's
//! participants; remainder cents go to the lowest user ids first, so the
//! shares always add up to the amount paid and the net positions of all
//! members of one expense sum to zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::config::SplitPolicy;
use crate::loader::RecordSet;
use crate::models::{
    ExpenseId, ExpenseShareId, Group, GroupId, MemberRole, Money, SharedExpense, SharedExpenseId,
    UserId,
};

/// One party's position on a single group expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantNet {
    pub user_id: UserId,
    /// The party's part of the split, zero if excluded from it
    pub share: Money,
    /// What the party is owed (positive) or owes (negative)
    pub net: Money,
}

/// Members who take part in the split, in ascending user id order
fn split_participants(group: &Group, policy: SplitPolicy) -> Vec<&UserId> {
    let mut participants: Vec<&UserId> = group
        .distinct_members()
        .into_iter()
        .filter(|m| match policy {
            SplitPolicy::AllMembers => true,
            SplitPolicy::ExcludeChildren => m.role != MemberRole::Child,
        })
        .map(|m| &m.user_id)
        .collect();
    participants.sort();
    participants
}

/// Net position of every member of `group` (and the payer) on `expense`
///
/// Entries are in ascending user id order. A payer who is no longer a
/// member is still listed, with no share of the split.
pub fn settle_group_expense(
    expense: &SharedExpense,
    group: &Group,
    policy: SplitPolicy,
) -> Vec<ParticipantNet> {
    let participants = split_participants(group, policy);
    let shares: BTreeMap<&UserId, Money> = participants
        .iter()
        .copied()
        .zip(expense.total_amount.split_evenly(participants.len()))
        .collect();

    let mut parties: Vec<&UserId> = group.members.iter().map(|m| &m.user_id).collect();
    parties.push(&expense.paid_by);
    parties.sort();
    parties.dedup();

    parties
        .into_iter()
        .map(|user_id| {
            let share = shares.get(user_id).copied().unwrap_or_default();
            let net = if user_id == &expense.paid_by {
                expense.total_amount - share
            } else {
                -share
            };
            ParticipantNet {
                user_id: user_id.clone(),
                share,
                net,
            }
        })
        .collect()
}

/// The record a settlement item was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SettlementSource {
    /// A group expense split equally across the group
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: GroupId,
        group_name: String,
        shared_expense_id: SharedExpenseId,
    },
    /// A personal expense split with one other user
    #[serde(rename_all = "camelCase")]
    Individual {
        expense_id: ExpenseId,
        expense_share_id: ExpenseShareId,
        /// The other party of the split
        counterparty: UserId,
        is_paid: bool,
    },
}

impl SettlementSource {
    /// `"Group"` or `"Individual"`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Group { .. } => "Group",
            Self::Individual { .. } => "Individual",
        }
    }

    fn record_id(&self) -> String {
        match self {
            Self::Group {
                shared_expense_id, ..
            } => shared_expense_id.as_uuid().to_string(),
            Self::Individual {
                expense_share_id, ..
            } => expense_share_id.as_uuid().to_string(),
        }
    }
}

/// The requesting user's position on one shared record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementItem {
    #[serde(flatten)]
    pub source: SettlementSource,
    pub description: String,
    pub total_amount: Money,
    pub user_share: Money,
    pub paid_by: UserId,
    pub is_current_user_payer: bool,
    pub net_contribution: Money,
    pub date: NaiveDate,
}

/// A group member as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: UserId,
    pub role: MemberRole,
}

/// Membership and settlement totals for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: GroupId,
    pub name: String,
    /// The requesting user's role
    pub role: MemberRole,
    pub member_count: usize,
    pub members: Vec<MemberView>,
    pub shared_expense_count: usize,
    pub total_shared_amount: Money,
    pub user_share_total: Money,
    pub user_paid_total: Money,
    pub net_balance: Money,
}

impl GroupSummary {
    fn new(group: &Group, user: &UserId) -> Self {
        Self {
            group_id: group.id,
            name: group.name.clone(),
            role: group.role_of(user).unwrap_or_default(),
            member_count: group.member_count(),
            members: group
                .distinct_members()
                .into_iter()
                .map(|m| MemberView {
                    user_id: m.user_id.clone(),
                    role: m.role,
                })
                .collect(),
            shared_expense_count: 0,
            total_shared_amount: Money::zero(),
            user_share_total: Money::zero(),
            user_paid_total: Money::zero(),
            net_balance: Money::zero(),
        }
    }
}

/// The user's settlement position across all shared spending
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    /// Newest first
    pub items: Vec<SettlementItem>,
    pub groups: Vec<GroupSummary>,
    pub total_shared_balance: Money,
}

impl SettlementSummary {
    /// Settle every group expense and expense share in `records`
    pub fn calculate(records: &RecordSet, policy: SplitPolicy) -> Self {
        let user = &records.user_id;
        let mut items = Vec::new();
        let mut groups: BTreeMap<GroupId, GroupSummary> = records
            .groups
            .values()
            .map(|g| (g.id, GroupSummary::new(g, user)))
            .collect();

        for expense in &records.shared_expenses {
            let Some(group) = records.groups.get(&expense.group_id) else {
                warn!(
                    shared_expense = %expense.id,
                    group = %expense.group_id,
                    "Skipping group expense for a group outside the record set"
                );
                continue;
            };

            let position = settle_group_expense(expense, group, policy)
                .into_iter()
                .find(|p| &p.user_id == user)
                .unwrap_or_else(|| ParticipantNet {
                    user_id: user.clone(),
                    share: Money::zero(),
                    net: Money::zero(),
                });
            let is_payer = &expense.paid_by == user;

            if let Some(summary) = groups.get_mut(&group.id) {
                summary.shared_expense_count += 1;
                summary.total_shared_amount += expense.total_amount;
                summary.user_share_total += position.share;
                if is_payer {
                    summary.user_paid_total += expense.total_amount;
                }
                summary.net_balance += position.net;
            }

            items.push(SettlementItem {
                source: SettlementSource::Group {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    shared_expense_id: expense.id,
                },
                description: expense.description.clone(),
                total_amount: expense.total_amount,
                user_share: position.share,
                paid_by: expense.paid_by.clone(),
                is_current_user_payer: is_payer,
                net_contribution: position.net,
                date: expense.date,
            });
        }

        for share in &records.expense_shares {
            let Some(expense) = records.share_expenses.get(&share.expense_id) else {
                warn!(
                    share = %share.id,
                    expense = %share.expense_id,
                    "Skipping expense share whose expense was not loaded"
                );
                continue;
            };

            let (user_share, net, counterparty) = if expense.is_owned_by(user) {
                (
                    expense.amount - share.share_amount,
                    share.share_amount,
                    share.shared_with.clone(),
                )
            } else if &share.shared_with == user {
                (share.share_amount, -share.share_amount, expense.user_id.clone())
            } else {
                continue;
            };

            items.push(SettlementItem {
                source: SettlementSource::Individual {
                    expense_id: expense.id,
                    expense_share_id: share.id,
                    counterparty,
                    is_paid: share.is_paid,
                },
                description: expense.description.clone(),
                total_amount: expense.amount,
                user_share,
                paid_by: expense.user_id.clone(),
                is_current_user_payer: expense.is_owned_by(user),
                net_contribution: net,
                date: expense.date,
            });
        }

        items.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.source.record_id().cmp(&b.source.record_id()))
        });

        Self {
            total_shared_balance: items.iter().map(|i| i.net_contribution).sum(),
            items,
            groups: groups.into_values().collect(),
        }
    }
}
