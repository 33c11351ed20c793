//! Draft → create-listing payload mapping.
//!
//! One exhaustive match over the details variant; each arm produces only its
//! own category's wire keys, so a furniture body can never carry job fields.
//! Blank optional strings are dropped rather than sent as `""`.

use dubilist_api::{
    CreateListingRequest, ElectronicsAttributes, GoodsAttributes, GoodsDetailsBody,
    JobsAttributes, ListingAttributes, MotorsAttributes, PropertyAttributes,
};

use crate::draft::{CategoryDetails, ItemDetails, ListingDraft};

/// Build the flat create-listing request body for a draft.
///
/// The category id on the wire is the sub-category when one is selected,
/// otherwise the main category.
pub fn build_create_request(draft: &ListingDraft) -> CreateListingRequest {
    let common = &draft.common;

    let attributes = match draft.details() {
        CategoryDetails::Motors(motors) => ListingAttributes::Motors(MotorsAttributes {
            make: clean(&motors.make),
            model: clean(&motors.model),
            year: motors.year,
            kilometres: motors.kilometres,
            fuel_type: clean(&motors.fuel_type),
            transmission: clean(&motors.transmission),
            condition: clean(&motors.condition),
        }),
        CategoryDetails::Electronics(electronics) => {
            ListingAttributes::Electronics(ElectronicsAttributes {
                brand: clean(&electronics.brand),
                model: clean(&electronics.model),
                condition: clean(&electronics.condition),
                storage: clean(&electronics.storage),
                colour: clean(&electronics.colour),
                device_type: clean(&electronics.device_type),
            })
        }
        CategoryDetails::Property(property) => ListingAttributes::Property(PropertyAttributes {
            sale_type: clean(&property.sale_type),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area: clean(&property.area),
            furnishing: clean(&property.furnishing),
            amenities: property.amenities.clone(),
        }),
        CategoryDetails::Classifieds(item) | CategoryDetails::Furniture(item) => {
            ListingAttributes::Goods(GoodsAttributes {
                condition: clean(&item.condition),
                attributes: GoodsDetailsBody {
                    material: clean(&item.material),
                    dimensions: dimensions(item),
                    weight: clean(&item.weight),
                },
            })
        }
        CategoryDetails::Jobs(jobs) => ListingAttributes::Jobs(JobsAttributes {
            job_title: clean(&jobs.job_title),
            company_name: clean(&jobs.company_name),
            industry: clean(&jobs.industry),
            job_type: clean(&jobs.job_type),
            experience: clean(&jobs.experience),
            salary_min: jobs.salary_min,
            salary_max: jobs.salary_max,
            job_description: clean(&jobs.job_description),
            skills_required: split_lines(&jobs.skills_required),
            responsibilities: split_lines(&jobs.responsibilities),
            requirements: clean(&jobs.requirements),
            benefits: clean(&jobs.benefits),
            contact_website: clean(&common.company_website),
        }),
    };

    CreateListingRequest {
        title: common.title.trim().to_string(),
        description: clean(&common.description),
        price: common.price,
        currency: if common.currency.trim().is_empty() {
            "AED".to_string()
        } else {
            common.currency.clone()
        },
        category_id: draft.effective_category_id(),
        city: clean(&common.city),
        country: "UAE".to_string(),
        attributes,
    }
}

/// Drop blank optional strings so they are omitted from the body.
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Split multi-line form text into entries, dropping empty lines.
fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"LxWxH"` centimetre string, only when all three sides are known.
fn dimensions(item: &ItemDetails) -> Option<String> {
    match (item.length_cm, item.width_cm, item.height_cm) {
        (Some(l), Some(w), Some(h)) => Some(format!("{l}x{w}x{h}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{ElectronicsDetails, JobsDetails, MotorsDetails, PropertyDetails};
    use crate::taxonomy::MainCategory;

    fn draft_with(details: CategoryDetails) -> ListingDraft {
        let mut draft = ListingDraft::new(details.category());
        draft.details = details;
        draft.common.title = "Test listing".to_string();
        draft.common.price = Some(100.0);
        draft
    }

    #[test]
    fn test_furniture_payload_has_no_job_keys() {
        let draft = draft_with(CategoryDetails::Furniture(ItemDetails {
            condition: Some("Used".to_string()),
            material: Some("Teak".to_string()),
            length_cm: Some(180.0),
            width_cm: Some(90.0),
            height_cm: Some(75.0),
            weight: Some("40kg".to_string()),
        }));

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert!(body.get("skillsRequired").is_none());
        assert!(body.get("jobTitle").is_none());
        assert!(body.get("bedrooms").is_none());
        assert_eq!(body["condition"], "Used");
        assert_eq!(body["attributes"]["dimensions"], "180x90x75");
        assert_eq!(body["attributes"]["material"], "Teak");
        assert_eq!(body["country"], "UAE");
    }

    #[test]
    fn test_dimensions_need_all_three_sides() {
        let item = ItemDetails {
            length_cm: Some(100.0),
            width_cm: None,
            height_cm: Some(75.0),
            ..ItemDetails::default()
        };
        assert_eq!(dimensions(&item), None);
        let draft = draft_with(CategoryDetails::Classifieds(item));
        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert!(body["attributes"].get("dimensions").is_none());
    }

    #[test]
    fn test_jobs_multiline_fields_split_dropping_blanks() {
        let mut draft = draft_with(CategoryDetails::Jobs(JobsDetails {
            job_title: Some("Backend engineer".to_string()),
            skills_required: "Rust\n\n  SQL  \nDocker\n".to_string(),
            responsibilities: "Ship features\nReview code".to_string(),
            requirements: Some("3+ years experience\nBSc preferred".to_string()),
            ..JobsDetails::default()
        }));
        draft.common.company_website = Some("https://acme.example".to_string());

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert_eq!(
            body["skillsRequired"],
            serde_json::json!(["Rust", "SQL", "Docker"])
        );
        assert_eq!(
            body["responsibilities"],
            serde_json::json!(["Ship features", "Review code"])
        );
        // Free-text fields stay free text.
        assert_eq!(body["requirements"], "3+ years experience\nBSc preferred");
        assert_eq!(body["contactWebsite"], "https://acme.example");
    }

    #[test]
    fn test_motors_keys() {
        let draft = draft_with(CategoryDetails::Motors(MotorsDetails {
            make: Some("Toyota".to_string()),
            model: Some("Yaris".to_string()),
            year: Some(2019),
            kilometres: Some(43_000),
            fuel_type: Some("Petrol".to_string()),
            transmission: Some("Automatic".to_string()),
            condition: Some("Used".to_string()),
        }));

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert_eq!(body["make"], "Toyota");
        assert_eq!(body["fuelType"], "Petrol");
        assert_eq!(body["kilometres"], 43_000);
        assert_eq!(body["categoryId"], 1);
    }

    #[test]
    fn test_property_amenities_under_attributes_key() {
        let draft = draft_with(CategoryDetails::Property(PropertyDetails {
            sale_type: Some("Rent".to_string()),
            bedrooms: 2,
            bathrooms: 1,
            area: Some("1200 sqft".to_string()),
            furnishing: Some("Furnished".to_string()),
            amenities: vec!["Parking".to_string(), "Pool".to_string()],
        }));

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert_eq!(body["bedrooms"], 2);
        assert_eq!(body["attributes"], serde_json::json!(["Parking", "Pool"]));
        assert_eq!(body["saleType"], "Rent");
        assert_eq!(body["area"], "1200 sqft");
    }

    #[test]
    fn test_sub_category_becomes_wire_category_id() {
        let mut draft = draft_with(CategoryDetails::Electronics(ElectronicsDetails {
            brand: Some("Apple".to_string()),
            ..ElectronicsDetails::default()
        }));
        draft.sub_category_id = Some(20);

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert_eq!(body["categoryId"], 20);
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let mut draft = draft_with(CategoryDetails::Motors(MotorsDetails {
            make: Some("   ".to_string()),
            ..MotorsDetails::default()
        }));
        draft.common.description = Some(String::new());
        draft.common.city = None;

        let body = serde_json::to_value(build_create_request(&draft)).unwrap();
        assert!(body.get("make").is_none());
        assert!(body.get("description").is_none());
        assert!(body.get("city").is_none());
        assert_eq!(body["currency"], "AED");
    }
}
