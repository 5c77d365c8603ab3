use crate::constants::{
    MILITARY_POST_OFFICES, MILITARY_STATES, MILITARY_STREET_MARKER, PO_BOX_VARIANTS,
};

/// Returns true when an address can be sent to the geocoder: street, city and state
/// are all present, and it is neither military mail nor a PO box.
pub fn can_geocode(street: &str, city: &str, state: &str) -> bool {
    if street.is_empty() || city.is_empty() || state.is_empty() {
        return false;
    }
    let street = street.to_uppercase();
    let city = city.to_uppercase();
    let state = state.to_uppercase();

    !is_military_mail(&street, &city, &state) && !has_po_box(&street)
}

fn is_military_mail(street: &str, city: &str, state: &str) -> bool {
    MILITARY_POST_OFFICES.iter().any(|office| city.contains(office))
        || MILITARY_STATES.contains(&state)
        || street.contains(MILITARY_STREET_MARKER)
}

fn has_po_box(street: &str) -> bool {
    PO_BOX_VARIANTS.iter().any(|variant| street.contains(variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_address_is_eligible() {
        assert!(can_geocode("123 Main St", "Madison", "WI"));
    }

    #[test]
    fn empty_required_fields_are_ineligible() {
        assert!(!can_geocode("", "Madison", "WI"));
        assert!(!can_geocode("123 Main St", "", "WI"));
        assert!(!can_geocode("123 Main St", "Madison", ""));
    }

    #[test]
    fn military_mail_is_ineligible() {
        assert!(!can_geocode("Unit 2050 Box 4190", "APO", "AP"));
        assert!(!can_geocode("Unit 2050", "fpo", "CA"));
        assert!(!can_geocode("Unit 2050", "DPO", "NY"));
        assert!(!can_geocode("123 Main St", "Madison", "ae"));
        assert!(!can_geocode("123 Main St", "Madison", "AA"));
        assert!(!can_geocode("psc 802 Box 74", "Madison", "WI"));
    }

    #[test]
    fn military_state_must_match_exactly() {
        assert!(can_geocode("123 Main St", "Madison", "AAA"));
    }

    #[test]
    fn every_po_box_spelling_is_ineligible() {
        for variant in PO_BOX_VARIANTS {
            let street = format!("{} 1234", variant.to_lowercase());
            assert!(
                !can_geocode(&street, "Madison", "WI"),
                "expected '{}' to be rejected",
                street
            );
        }
    }
}
