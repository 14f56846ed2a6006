//! Pure filter/sort/paginate pipeline over fetched activities.
//!
//! No side effects: current-page mutation lives in `SessionState`, which
//! re-clamps against `Page::max_page` on every render because page size,
//! filters, or the underlying data can change between calls.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use roamly_catalog::Activity;

use crate::categories::Category;

/// Sort options offered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Unsorted,
    RatingAsc,
    RatingDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Unsorted,
        SortOrder::RatingAsc,
        SortOrder::RatingDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unsorted => "none",
            Self::RatingAsc => "rating-asc",
            Self::RatingDesc => "rating-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::Unsorted),
            "rating-asc" => Ok(Self::RatingAsc),
            "rating-desc" => Ok(Self::RatingDesc),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// One rendered page of filtered, sorted activities.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Activity>,
    /// Total count after filtering, before pagination.
    pub total: usize,
    pub max_page: usize,
    /// The page actually rendered, after clamping.
    pub page: usize,
}

/// Membership test: with no active categories everything passes; otherwise
/// at least one keyword from the union of active categories must occur in
/// the activity's name or description, case-insensitively.
pub fn matches_categories(activity: &Activity, active: &BTreeSet<Category>) -> bool {
    if active.is_empty() {
        return true;
    }

    let haystack = format!(
        "{} {}",
        activity.name,
        activity.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    active
        .iter()
        .flat_map(|c| c.keywords())
        .any(|kw| haystack.contains(kw))
}

pub fn max_page(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// Run the full pipeline and slice out one page.
pub fn render_page(
    activities: &[Activity],
    active: &BTreeSet<Category>,
    sort: SortOrder,
    page_size: usize,
    page: usize,
) -> Page {
    let mut filtered: Vec<&Activity> = activities
        .iter()
        .filter(|a| matches_categories(a, active))
        .collect();

    sort_activities(&mut filtered, sort);

    let total = filtered.len();
    let max_page = max_page(total, page_size);
    let page = page.clamp(1, max_page);

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        total,
        max_page,
        page,
    }
}

fn sort_activities(list: &mut [&Activity], sort: SortOrder) {
    match sort {
        SortOrder::Unsorted => {}
        SortOrder::RatingAsc => list.sort_by(|a, b| rating_key(a).total_cmp(&rating_key(b))),
        SortOrder::RatingDesc => list.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a))),
        SortOrder::PriceAsc => list.sort_by(|a, b| price_key(a).total_cmp(&price_key(b))),
        SortOrder::PriceDesc => list.sort_by(|a, b| cmp_price_desc(a, b)),
    }
}

/// Missing ratings sort as the lowest possible key: first ascending, last
/// descending.
fn rating_key(a: &Activity) -> f64 {
    a.rating.unwrap_or(f64::NEG_INFINITY)
}

/// Missing or unparseable prices sort as +inf, pushing them to the end.
fn price_key(a: &Activity) -> f64 {
    a.price_amount().unwrap_or(f64::INFINITY)
}

/// Price descending still keeps missing prices at the end, so it is not a
/// plain reversal of the ascending comparator.
fn cmp_price_desc(a: &Activity, b: &Activity) -> Ordering {
    match (a.price_amount(), b.price_amount()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roamly_catalog::Price;

    fn activity(name: &str, description: Option<&str>) -> Activity {
        Activity {
            name: name.to_string(),
            rating: None,
            description: description.map(String::from),
            price: None,
            duration: None,
            pictures: vec![],
            booking_link: None,
        }
    }

    fn rated(name: &str, rating: Option<f64>) -> Activity {
        Activity {
            rating,
            ..activity(name, None)
        }
    }

    fn priced(name: &str, amount: Option<&str>) -> Activity {
        Activity {
            price: Some(Price {
                amount: amount.map(String::from),
                currency: Some("EUR".into()),
            }),
            ..activity(name, None)
        }
    }

    #[test]
    fn test_empty_category_set_passes_everything() {
        let a = activity("Anything at all", None);
        assert!(matches_categories(&a, &BTreeSet::new()));
    }

    #[test]
    fn test_castle_tour_membership() {
        let a = activity("City walk", Some("Guided castle tour"));

        assert!(matches_categories(&a, &BTreeSet::from([Category::Historical])));
        assert!(matches_categories(&a, &BTreeSet::from([Category::Tours])));
        assert!(!matches_categories(&a, &BTreeSet::from([Category::Wine])));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let a = activity("WINE & Cheese Evening", None);
        assert!(matches_categories(&a, &BTreeSet::from([Category::Wine])));
    }

    #[test]
    fn test_union_of_active_categories() {
        let a = activity("Vineyard visit", None);
        let active = BTreeSet::from([Category::Museums, Category::Wine]);
        assert!(matches_categories(&a, &active));
    }

    #[test]
    fn test_rating_desc_missing_sorts_last() {
        let activities = vec![
            rated("no rating", None),
            rated("four", Some(4.0)),
            rated("two", Some(2.0)),
        ];

        let page = render_page(
            &activities,
            &BTreeSet::new(),
            SortOrder::RatingDesc,
            10,
            1,
        );

        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["four", "two", "no rating"]);
    }

    #[test]
    fn test_rating_asc_missing_sorts_first() {
        let activities = vec![
            rated("four", Some(4.0)),
            rated("no rating", None),
            rated("two", Some(2.0)),
        ];

        let page = render_page(&activities, &BTreeSet::new(), SortOrder::RatingAsc, 10, 1);

        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["no rating", "two", "four"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let activities = vec![
            rated("first", Some(3.0)),
            rated("second", Some(3.0)),
            rated("third", Some(3.0)),
        ];

        let page = render_page(&activities, &BTreeSet::new(), SortOrder::RatingDesc, 10, 1);

        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_price_sorts_push_missing_to_the_end_both_ways() {
        let activities = vec![
            priced("unpriced", None),
            priced("cheap", Some("10.00")),
            priced("on request", Some("call us")),
            priced("dear", Some("90.00")),
        ];

        let asc = render_page(&activities, &BTreeSet::new(), SortOrder::PriceAsc, 10, 1);
        let names: Vec<&str> = asc.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["cheap", "dear", "unpriced", "on request"]);

        let desc = render_page(&activities, &BTreeSet::new(), SortOrder::PriceDesc, 10, 1);
        let names: Vec<&str> = desc.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["dear", "cheap", "unpriced", "on request"]);
    }

    #[test]
    fn test_unsorted_preserves_input_order() {
        let activities = vec![rated("b", Some(1.0)), rated("a", Some(5.0))];
        let page = render_page(&activities, &BTreeSet::new(), SortOrder::Unsorted, 10, 1);
        assert_eq!(page.items[0].name, "b");
    }

    #[test]
    fn test_max_page_never_below_one() {
        assert_eq!(max_page(0, 10), 1);
        assert_eq!(max_page(10, 10), 1);
        assert_eq!(max_page(11, 10), 2);
        assert_eq!(max_page(21, 5), 5);
    }

    #[test]
    fn test_page_clamping_and_slice_lengths() {
        let activities: Vec<Activity> = (0..23)
            .map(|i| activity(&format!("a{}", i), None))
            .collect();

        // 23 items, page size 10: pages of 10, 10, 3
        let page = render_page(&activities, &BTreeSet::new(), SortOrder::Unsorted, 10, 3);
        assert_eq!(page.max_page, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 23);

        // Requested page beyond the end clamps to the last page
        let page = render_page(&activities, &BTreeSet::new(), SortOrder::Unsorted, 10, 99);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);

        // Page 0 clamps to 1
        let page = render_page(&activities, &BTreeSet::new(), SortOrder::Unsorted, 10, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].name, "a0");
    }

    #[test]
    fn test_empty_filter_result_still_has_one_page() {
        let activities = vec![activity("Nothing relevant", None)];
        let page = render_page(
            &activities,
            &BTreeSet::from([Category::Wine]),
            SortOrder::Unsorted,
            10,
            1,
        );
        assert_eq!(page.total, 0);
        assert_eq!(page.max_page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_filter_applies_before_pagination() {
        let mut activities = Vec::new();
        for i in 0..6 {
            activities.push(activity(&format!("Wine tasting {}", i), None));
            activities.push(activity(&format!("Street market {}", i), None));
        }

        let page = render_page(
            &activities,
            &BTreeSet::from([Category::Wine]),
            SortOrder::Unsorted,
            5,
            2,
        );

        assert_eq!(page.total, 6);
        assert_eq!(page.max_page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Wine tasting 5");
    }

    #[test]
    fn test_sort_order_round_trip_from_str() {
        for sort in SortOrder::ALL {
            let parsed: SortOrder = sort.display_name().parse().unwrap();
            assert_eq!(parsed, sort);
        }
        assert!("price".parse::<SortOrder>().is_err());
    }
}
