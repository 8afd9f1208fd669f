//! Airline, airport and city registries and the filtering they share.
//!
//! Every filter is a full rescan of a small in-memory collection. Results
//! borrow from the source and keep its order.

pub mod airline;
pub mod airport;

use serde::{Deserialize, Serialize};

/// A select-box value: either the "all" sentinel or one concrete option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice<T> {
    All,
    Only(T),
}

// Written out so `T` needs no `Default` of its own
impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

/// A set of predicates over `T`, all of which must hold.
pub trait Criteria<T> {
    fn admits(&self, item: &T) -> bool;
}

pub fn filter<'a, T, C>(items: &'a [T], criteria: &C) -> Vec<&'a T>
where
    C: Criteria<T>,
{
    items.iter().filter(|item| criteria.admits(item)).collect()
}

/// Case-insensitive substring match of `query` against any of `fields`.
/// A blank query matches everything.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&query))
}

/// Cycle a choice through `All` followed by each of `options`.
pub fn cycle_choice<T: Clone + PartialEq>(current: &Choice<T>, options: &[T]) -> Choice<T> {
    match current {
        Choice::All => options.first().cloned().map(Choice::Only).unwrap_or(Choice::All),
        Choice::Only(value) => {
            let idx = options.iter().position(|o| o == value);
            match idx.and_then(|i| options.get(i + 1)) {
                Some(next) => Choice::Only(next.clone()),
                None => Choice::All,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl Criteria<u32> for Even {
        fn admits(&self, item: &u32) -> bool {
            item % 2 == 0
        }
    }

    #[test]
    fn test_filter_keeps_order() {
        let items = [4, 1, 2, 7, 8];
        let kept: Vec<u32> = filter(&items, &Even).into_iter().copied().collect();
        assert_eq!(kept, vec![4, 2, 8]);
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("  ", &["anything"]));
        assert!(matches_query("INDI", &["Air", "IndiGo"]));
        assert!(!matches_query("zzz", &["Air", "IndiGo"]));
    }

    #[test]
    fn test_choice_all_admits_everything() {
        let all: Choice<&str> = Choice::All;
        assert!(all.admits(&"x"));
        assert!(Choice::Only("x").admits(&"x"));
        assert!(!Choice::Only("x").admits(&"y"));
    }

    #[test]
    fn test_cycle_choice() {
        let opts = [1, 2];
        let c = cycle_choice(&Choice::All, &opts);
        assert_eq!(c, Choice::Only(1));
        let c = cycle_choice(&c, &opts);
        assert_eq!(c, Choice::Only(2));
        let c = cycle_choice(&c, &opts);
        assert_eq!(c, Choice::All);
    }
}
