//! Row grouping for one-to-many join results.
//!
//! A `parent LEFT JOIN child` query returns one row per (parent, child) pair
//! and a single row with a null child for parents without children. This
//! module folds such a flat sequence back into one entry per parent, keeping
//! the order in which parents first appear.
//!
//! Children are appended exactly as they arrive. Repeated child rows produced
//! by join fan-out are kept as repeated entries.

use std::collections::HashMap;
use std::hash::Hash;

/// One row of a parent/optional-child join.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatRow<K, A, C> {
    pub key: K,
    /// Parent attributes carried on every row for that parent.
    pub attrs: A,
    pub child: Option<C>,
}

impl<K, A, C> FlatRow<K, A, C> {
    pub fn new(key: K, attrs: A, child: Option<C>) -> Self {
        Self { key, attrs, child }
    }
}

/// A parent together with every non-null child seen for it.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedParent<K, A, C> {
    pub key: K,
    /// Attributes from the first row seen for `key`.
    pub attrs: A,
    pub children: Vec<C>,
}

/// Group `rows` by parent key in a single pass.
///
/// Output order is the order of first appearance of each key. A row whose
/// child is `None` registers its parent but adds nothing to `children`.
/// Attributes on later rows for an already-seen key are ignored.
pub fn group_rows<K, A, C, I>(rows: I) -> Vec<GroupedParent<K, A, C>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = FlatRow<K, A, C>>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupedParent<K, A, C>> = Vec::new();

    for FlatRow { key, attrs, child } in rows {
        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                slots.insert(key.clone(), slot);
                groups.push(GroupedParent { key, attrs, children: Vec::new() });
                slot
            }
        };
        if let Some(child) = child {
            groups[slot].children.push(child);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::collections::HashSet;

    type Row = FlatRow<u8, u16, u8>;

    fn row(key: &str, label: &str, child: Option<&str>) -> FlatRow<String, String, String> {
        FlatRow::new(key.to_string(), label.to_string(), child.map(str::to_string))
    }

    /// Inverse of grouping: one row per child, one null-child row for childless parents.
    fn flatten<K: Clone, A: Clone, C: Clone>(groups: &[GroupedParent<K, A, C>]) -> Vec<FlatRow<K, A, C>> {
        groups
            .iter()
            .flat_map(|g| {
                if g.children.is_empty() {
                    vec![FlatRow::new(g.key.clone(), g.attrs.clone(), None)]
                } else {
                    g.children
                        .iter()
                        .map(|c| FlatRow::new(g.key.clone(), g.attrs.clone(), Some(c.clone())))
                        .collect()
                }
            })
            .collect()
    }

    fn to_rows(raw: Vec<(u8, u16, Option<u8>)>) -> Vec<Row> {
        raw.into_iter().map(|(k, a, c)| FlatRow::new(k, a, c)).collect()
    }

    #[test]
    fn groups_children_under_first_seen_parents() {
        let rows = vec![
            row("A", "Tech", Some("x")),
            row("A", "Tech", Some("y")),
            row("B", "Retail", None),
        ];
        let grouped = group_rows(rows);
        assert_eq!(
            grouped,
            vec![
                GroupedParent { key: "A".to_string(), attrs: "Tech".to_string(), children: vec!["x".to_string(), "y".to_string()] },
                GroupedParent { key: "B".to_string(), attrs: "Retail".to_string(), children: vec![] },
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let grouped = group_rows(Vec::<Row>::new());
        assert!(grouped.is_empty());
    }

    #[test]
    fn interleaved_rows_keep_first_appearance_order() {
        let rows = vec![
            row("B", "Retail", Some("r1")),
            row("A", "Tech", Some("t1")),
            row("B", "Retail", Some("r2")),
            row("C", "Health", None),
            row("A", "Tech", Some("t2")),
        ];
        let grouped = group_rows(rows);
        let keys: Vec<&str> = grouped.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["B", "A", "C"]);
        assert_eq!(grouped[0].children, ["r1", "r2"]);
        assert_eq!(grouped[1].children, ["t1", "t2"]);
        assert!(grouped[2].children.is_empty());
    }

    #[test]
    fn duplicate_children_from_fan_out_are_kept() {
        let rows = vec![
            row("A", "Tech", Some("x")),
            row("A", "Tech", Some("x")),
        ];
        let grouped = group_rows(rows);
        assert_eq!(grouped[0].children, ["x", "x"]);
    }

    #[test]
    fn attributes_come_from_the_first_row() {
        let rows = vec![
            row("A", "Tech", None),
            row("A", "Technology", Some("x")),
        ];
        let grouped = group_rows(rows);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].attrs, "Tech");
        assert_eq!(grouped[0].children, ["x"]);
    }

    #[test]
    fn null_child_after_children_adds_nothing() {
        let rows = vec![
            row("A", "Tech", Some("x")),
            row("A", "Tech", None),
        ];
        let grouped = group_rows(rows);
        assert_eq!(grouped[0].children, ["x"]);
    }

    #[quickcheck]
    fn distinct_parent_count_is_preserved(raw: Vec<(u8, u16, Option<u8>)>) -> bool {
        let rows = to_rows(raw);
        let distinct: HashSet<u8> = rows.iter().map(|r| r.key).collect();
        group_rows(rows).len() == distinct.len()
    }

    #[quickcheck]
    fn output_order_is_first_occurrence_order(raw: Vec<(u8, u16, Option<u8>)>) -> bool {
        let rows = to_rows(raw);
        let mut seen = HashSet::new();
        let expected: Vec<u8> = rows.iter().map(|r| r.key).filter(|k| seen.insert(*k)).collect();
        let actual: Vec<u8> = group_rows(rows).iter().map(|g| g.key).collect();
        actual == expected
    }

    #[quickcheck]
    fn children_are_exactly_the_non_null_children_in_order(raw: Vec<(u8, u16, Option<u8>)>) -> bool {
        let rows = to_rows(raw);
        group_rows(rows.clone()).iter().all(|g| {
            let expected: Vec<u8> = rows.iter().filter(|r| r.key == g.key).filter_map(|r| r.child).collect();
            g.children == expected
        })
    }

    #[quickcheck]
    fn regrouping_the_flattened_output_is_idempotent(raw: Vec<(u8, u16, Option<u8>)>) -> bool {
        let grouped = group_rows(to_rows(raw));
        group_rows(flatten(&grouped)) == grouped
    }
}
