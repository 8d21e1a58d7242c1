//! Account tree construction.
//!
//! Builds the nested chart-of-accounts hierarchy from the flat parent-pointer
//! list without recursing over the raw pointers: an id -> index map is built
//! first, children are attached in a single linear pass, and only declared
//! roots (`parent_id == None`) are emitted. Nodes caught in a parent cycle or
//! pointing at a missing parent are unreachable from any root and are dropped
//! rather than overflowing the stack.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use kassa_shared::types::AccountId;

use super::types::{Account, AccountType};

/// A node in the nested account hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNode {
    /// Account identifier.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Depth hint: 1 = group, 2 = subgroup, 3 = detail.
    pub level: i16,
    /// Whether the account may receive journal lines.
    pub is_detail: bool,
    /// Child accounts, ordered by code.
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    fn leaf(account: &Account) -> Self {
        Self {
            id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            level: account.level,
            is_detail: account.is_detail,
            children: Vec::new(),
        }
    }
}

/// Builds the nested account tree from a flat account list.
///
/// Children are ordered by code at every level. The input order is
/// irrelevant; parents do not need to precede their children.
#[must_use]
pub fn build_tree(accounts: &[Account]) -> Vec<AccountNode> {
    let index: HashMap<AccountId, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| (account.id, i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); accounts.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, account) in accounts.iter().enumerate() {
        match account.parent_id {
            None => roots.push(i),
            Some(parent_id) => {
                if let Some(&parent_index) = index.get(&parent_id) {
                    children[parent_index].push(i);
                }
                // A dangling parent pointer is neither a root nor attachable.
            }
        }
    }

    for list in &mut children {
        list.sort_by(|&a, &b| accounts[a].code.cmp(&accounts[b].code));
    }
    roots.sort_by(|&a, &b| accounts[a].code.cmp(&accounts[b].code));

    // Visit order from the roots; every reachable node appears exactly once
    // because each index sits in at most one children list.
    let mut order: Vec<usize> = Vec::with_capacity(accounts.len());
    let mut stack: Vec<usize> = roots.clone();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().copied());
    }

    // Attach children before their parent by replaying the order in reverse.
    let mut slots: Vec<Option<AccountNode>> = accounts
        .iter()
        .map(|account| Some(AccountNode::leaf(account)))
        .collect();

    for &i in order.iter().rev() {
        let kids: Vec<AccountNode> = children[i]
            .iter()
            .filter_map(|&child| slots[child].take())
            .collect();
        if let Some(node) = slots[i].as_mut() {
            node.children = kids;
        }
    }

    roots.into_iter().filter_map(|i| slots[i].take()).collect()
}
