//! Marketplace category taxonomy.
//!
//! Two-level: six main categories, each with a fixed set of sub-categories.
//! The tables are part of the wire contract — the backend stores the numeric
//! ids — so they are compiled in rather than fetched.

use dubilist_api::CategoryId;

/// The six main categories a listing can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainCategory {
    Motors,
    Electronics,
    Property,
    Classifieds,
    Furniture,
    Jobs,
}

impl MainCategory {
    /// All main categories in display order.
    pub const ALL: [MainCategory; 6] = [
        MainCategory::Motors,
        MainCategory::Electronics,
        MainCategory::Property,
        MainCategory::Classifieds,
        MainCategory::Furniture,
        MainCategory::Jobs,
    ];

    pub fn id(&self) -> CategoryId {
        match self {
            MainCategory::Motors => 1,
            MainCategory::Electronics => 2,
            MainCategory::Property => 3,
            MainCategory::Classifieds => 4,
            MainCategory::Furniture => 5,
            MainCategory::Jobs => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MainCategory::Motors => "Motors",
            MainCategory::Electronics => "Electronics",
            MainCategory::Property => "Property",
            MainCategory::Classifieds => "Classifieds",
            MainCategory::Furniture => "Furniture",
            MainCategory::Jobs => "Jobs",
        }
    }

    pub fn from_id(id: CategoryId) -> Option<MainCategory> {
        MainCategory::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Jobs listings carry a company logo instead of a photo gallery.
    pub fn uses_logo(&self) -> bool {
        matches!(self, MainCategory::Jobs)
    }

    /// Price is mandatory everywhere except jobs posts (salary fields instead).
    pub fn requires_price(&self) -> bool {
        !matches!(self, MainCategory::Jobs)
    }
}

impl std::fmt::Display for MainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One selectable sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCategory {
    pub id: CategoryId,
    pub name: &'static str,
    pub parent: MainCategory,
}

/// Full sub-category table, grouped by parent, in display order.
pub const SUB_CATEGORIES: &[SubCategory] = &[
    // Motors
    SubCategory { id: 10, name: "Cars", parent: MainCategory::Motors },
    SubCategory { id: 11, name: "Bikes", parent: MainCategory::Motors },
    SubCategory { id: 12, name: "Trucks", parent: MainCategory::Motors },
    // Electronics
    SubCategory { id: 20, name: "Mobiles", parent: MainCategory::Electronics },
    SubCategory { id: 21, name: "Laptops", parent: MainCategory::Electronics },
    SubCategory { id: 22, name: "TVs", parent: MainCategory::Electronics },
    // Property
    SubCategory { id: 30, name: "Apartment", parent: MainCategory::Property },
    SubCategory { id: 31, name: "Villa", parent: MainCategory::Property },
    SubCategory { id: 32, name: "Office", parent: MainCategory::Property },
    // Classifieds
    SubCategory { id: 40, name: "General", parent: MainCategory::Classifieds },
    SubCategory { id: 41, name: "Services", parent: MainCategory::Classifieds },
    // Furniture
    SubCategory { id: 50, name: "Home Furniture", parent: MainCategory::Furniture },
    SubCategory { id: 51, name: "Office Furniture", parent: MainCategory::Furniture },
    // Jobs
    SubCategory { id: 60, name: "Full-time", parent: MainCategory::Jobs },
    SubCategory { id: 61, name: "Part-time", parent: MainCategory::Jobs },
    SubCategory { id: 62, name: "Contract", parent: MainCategory::Jobs },
    SubCategory { id: 63, name: "Internship", parent: MainCategory::Jobs },
];

/// Look up a sub-category by id.
pub fn sub_category(id: CategoryId) -> Option<&'static SubCategory> {
    SUB_CATEGORIES.iter().find(|s| s.id == id)
}

/// Sub-categories of one main category, in display order.
pub fn sub_categories_of(parent: MainCategory) -> impl Iterator<Item = &'static SubCategory> {
    SUB_CATEGORIES.iter().filter(move |s| s.parent == parent)
}

/// Amenity choices offered for property listings.
pub const AMENITIES: &[&str] = &["Parking", "Gym", "Pool", "AC", "Lift", "Security", "Balcony"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_category_ids_round_trip() {
        for category in MainCategory::ALL {
            assert_eq!(MainCategory::from_id(category.id()), Some(category));
        }
        assert_eq!(MainCategory::from_id(0), None);
        assert_eq!(MainCategory::from_id(7), None);
    }

    #[test]
    fn test_sub_category_lookup() {
        let cars = sub_category(10).unwrap();
        assert_eq!(cars.name, "Cars");
        assert_eq!(cars.parent, MainCategory::Motors);
        assert!(sub_category(99).is_none());
    }

    #[test]
    fn test_sub_categories_grouped_in_order() {
        let jobs: Vec<_> = sub_categories_of(MainCategory::Jobs).collect();
        assert_eq!(
            jobs.iter().map(|s| s.name).collect::<Vec<_>>(),
            vec!["Full-time", "Part-time", "Contract", "Internship"]
        );
        assert_eq!(jobs.iter().map(|s| s.id).collect::<Vec<_>>(), vec![60, 61, 62, 63]);
    }

    #[test]
    fn test_every_parent_has_sub_categories() {
        for category in MainCategory::ALL {
            assert!(
                sub_categories_of(category).count() >= 2,
                "{category} has no sub-categories"
            );
        }
    }

    #[test]
    fn test_only_jobs_uses_logo() {
        for category in MainCategory::ALL {
            assert_eq!(category.uses_logo(), category == MainCategory::Jobs);
            assert_eq!(category.requires_price(), category != MainCategory::Jobs);
        }
    }
}
