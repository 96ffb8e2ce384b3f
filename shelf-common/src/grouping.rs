//! Grouping of listings that describe the same product
//!
//! Records are consumed in input order. Each one joins the first group,
//! in creation order, whose category has the same equality key as the
//! record's title; otherwise it starts a new group whose category is the
//! record's normalized title (in its original word order).
//!
//! The group's category is normalized again when its equality key is taken,
//! exactly as a title would be. Normalization is not idempotent (a title like
//! `quil-o` normalizes to `quilo`, which normalizes to `kg`), so this key can
//! differ from the key of the record that created the group.
//!
//! Groups are never merged or removed. The result is sorted by category.

use crate::normalize::{equality_key, normalize};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// A cluster of listings considered to be the same product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Normalized title of the first listing in the group
    pub category: String,

    /// Number of listings in the group
    pub count: usize,

    /// Listings in input order, exactly as supplied
    pub products: Vec<Record>,
}

/// Online accumulator behind [`group`]
///
/// Keeps groups in creation order plus an index from equality key to the
/// first group carrying that key, so each record is placed with one lookup
/// instead of a scan over all groups.
#[derive(Debug, Default)]
pub struct Grouper {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    records: usize,
}

impl Grouper {
    /// Create an empty grouper
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one record into its group, creating the group if needed
    pub fn push(&mut self, record: &Record) {
        self.records += 1;
        let key = equality_key(&record.title);

        if let Some(&position) = self.index.get(&key) {
            let group = &mut self.groups[position];
            group.count += 1;
            group.products.push(record.clone());
            trace!(
                category = %group.category,
                title = %record.title,
                supermarket = %record.supermarket,
                "Listing joined group"
            );
            return;
        }

        let category = normalize(&record.title);
        let position = self.groups.len();

        // Later groups may share a key; the earliest one keeps it
        self.index.entry(equality_key(&category)).or_insert(position);

        trace!(
            category = %category,
            title = %record.title,
            supermarket = %record.supermarket,
            "New group"
        );
        self.groups.push(Group {
            category,
            count: 1,
            products: vec![record.clone()],
        });
    }

    /// Number of records pushed so far
    pub fn len(&self) -> usize {
        self.records
    }

    /// True if no record has been pushed
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Number of groups created so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Finish the pass and return the groups sorted by category
    ///
    /// The sort is stable, so groups with equal categories stay in creation
    /// order.
    pub fn finish(self) -> Vec<Group> {
        let mut groups = self.groups;
        groups.sort_by(|a, b| a.category.cmp(&b.category));
        groups
    }
}

/// Group records into clusters of the same product
///
/// Each call works on its own state; the output depends only on `records`
/// and their order.
///
/// # Examples
///
/// ```
/// use shelf_common::{group, Record};
///
/// let groups = group(&[
///     Record::new("Arroz Tio João 1kg", "A"),
///     Record::new("1kg Arroz Tio Joao", "B"),
///     Record::new("Feijão Preto 500g", "A"),
/// ]);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].category, "arroz tio joao 1kg");
/// assert_eq!(groups[0].count, 2);
/// assert_eq!(groups[1].category, "feijao preto 500g");
/// ```
pub fn group(records: &[Record]) -> Vec<Group> {
    let mut grouper = Grouper::new();
    for record in records {
        grouper.push(record);
    }
    grouper.finish()
}

/// Counts describing a grouping result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GroupingSummary {
    /// Listings across all groups
    pub records: usize,

    /// Number of groups
    pub groups: usize,

    /// Groups holding more than one listing
    pub matched: usize,
}

impl GroupingSummary {
    /// Summarize a grouping result
    pub fn from_groups(groups: &[Group]) -> Self {
        Self {
            records: groups.iter().map(|g| g.count).sum(),
            groups: groups.len(),
            matched: groups.iter().filter(|g| g.count > 1).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(group: &Group) -> Vec<&str> {
        group.products.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).is_empty());

        let grouper = Grouper::new();
        assert!(grouper.is_empty());
        assert_eq!(grouper.len(), 0);
        assert!(grouper.finish().is_empty());
    }

    #[test]
    fn test_rice_and_beans_scenario() {
        let groups = group(&[
            Record::new("Arroz Tio João 1kg", "A"),
            Record::new("1kg Arroz Tio Joao", "B"),
            Record::new("Feijão Preto 500g", "A"),
        ]);

        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].category, "arroz tio joao 1kg");
        assert_eq!(groups[0].count, 2);
        assert_eq!(
            groups[0].products,
            vec![
                Record::new("Arroz Tio João 1kg", "A"),
                Record::new("1kg Arroz Tio Joao", "B"),
            ]
        );

        assert_eq!(groups[1].category, "feijao preto 500g");
        assert_eq!(groups[1].count, 1);
        assert_eq!(groups[1].products, vec![Record::new("Feijão Preto 500g", "A")]);
    }

    #[test]
    fn test_category_keeps_first_member_word_order() {
        let groups = group(&[
            Record::new("Preto Feijão 1 Quilo", "B"),
            Record::new("Feijao Preto 1kg", "A"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "preto feijao 1kg");
        assert_eq!(titles(&groups[0]), vec!["Preto Feijão 1 Quilo", "Feijao Preto 1kg"]);
    }

    #[test]
    fn test_output_sorted_by_stored_category() {
        let groups = group(&[
            Record::new("Sabão em pó", "A"),
            Record::new("Leite 1L", "A"),
            Record::new("1kg Açúcar", "B"),
            Record::new("Café 500g", "C"),
        ]);

        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["1kg acucar", "cafe 500g", "leite 1l", "sabao em po"]);
    }

    #[test]
    fn test_different_sizes_are_different_groups() {
        let groups = group(&[
            Record::new("Leite 500ml", "A"),
            Record::new("Leite 1000ml", "B"),
            Record::new("Leite 1 litro", "C"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "leite 1l");
        assert_eq!(titles(&groups[0]), vec!["Leite 1000ml", "Leite 1 litro"]);
        assert_eq!(groups[1].category, "leite 500ml");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_category_is_normalized_again_for_matching() {
        // "quil-o" normalizes to "quilo"; matching normalizes that to "kg"
        let groups = group(&[
            Record::new("Arroz quil-o", "A"),
            Record::new("Arroz quilo", "B"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "arroz quilo");
        assert_eq!(groups[0].count, 2);
        assert_eq!(titles(&groups[0]), vec!["Arroz quil-o", "Arroz quilo"]);
    }

    #[test]
    fn test_earliest_group_wins_shared_key() {
        // Both groups get the key "arroz kg"; later matches go to the first
        let groups = group(&[
            Record::new("Arroz quil-o", "A"),
            Record::new("Arroz quil~o", "B"),
            Record::new("Arroz kg", "C"),
        ]);

        assert_eq!(groups.len(), 2);
        let quilo: Vec<&Group> = groups.iter().filter(|g| g.category == "arroz quilo").collect();
        assert_eq!(quilo.len(), 2);
        assert_eq!(titles(quilo[0]), vec!["Arroz quil-o", "Arroz kg"]);
        assert_eq!(titles(quilo[1]), vec!["Arroz quil~o"]);
    }

    #[test]
    fn test_blank_titles_share_a_group() {
        let groups = group(&[
            Record::new("", "A"),
            Record::new("  -- ", "B"),
            Record::new("Arroz", "C"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].category, "arroz");
    }

    #[test]
    fn test_grouper_counts() {
        let mut grouper = Grouper::new();
        grouper.push(&Record::new("Arroz 1kg", "A"));
        grouper.push(&Record::new("1kg arroz", "B"));
        grouper.push(&Record::new("Feijao 1kg", "B"));

        assert!(!grouper.is_empty());
        assert_eq!(grouper.len(), 3);
        assert_eq!(grouper.group_count(), 2);
    }

    #[test]
    fn test_summary() {
        let groups = group(&[
            Record::new("Arroz 1kg", "A"),
            Record::new("1kg arroz", "B"),
            Record::new("Feijao 1kg", "B"),
            Record::new("Arroz 1 quilo", "C"),
            Record::new("Sal 1kg", "C"),
        ]);

        assert_eq!(
            GroupingSummary::from_groups(&groups),
            GroupingSummary {
                records: 5,
                groups: 3,
                matched: 1,
            }
        );
    }
}
