//! Campaign selector
//!
//! Maps a classified cohort onto a campaign draft. Pure: no persistence, no
//! clock, no rendering. The draft it returns is never auto-activated.

use crate::domain::customer::Customer;
use crate::domain::{DomainError, Segment};

use super::{CampaignDraft, CampaignType, MessageIntent};

/// Build a campaign draft for a segment and its cohort.
///
/// The segment's canonical campaign type is used unless the caller overrides
/// it. Fails with `EmptyCohort` when there is nobody to target.
pub fn select_campaign(
    segment: Segment,
    customers: &[Customer],
    override_type: Option<CampaignType>,
) -> Result<CampaignDraft, DomainError> {
    if customers.is_empty() {
        return Err(DomainError::EmptyCohort);
    }

    let campaign_type = override_type.unwrap_or_else(|| CampaignType::from(segment));
    let intent = MessageIntent::for_campaign_type(campaign_type);

    Ok(CampaignDraft {
        campaign_type,
        name: format!("{} outreach", campaign_type),
        description: intent.objective.clone(),
        intent,
        target_customers: customers.iter().map(|c| *c.id()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::campaign::CampaignStatus;
    use chrono::Utc;

    fn cohort(segment: Segment, size: usize) -> Vec<Customer> {
        (0..size)
            .map(|i| {
                Customer::new(i as i64 + 1, format!("c{i}"), format!("c{i}@example.com"), Utc::now())
                    .with_segment(segment)
            })
            .collect()
    }

    #[test]
    fn test_empty_cohort_always_fails() {
        for segment in Segment::all() {
            let err = select_campaign(segment, &[], None).unwrap_err();
            assert!(matches!(err, DomainError::EmptyCohort));
        }
    }

    #[test]
    fn test_lost_segment_maps_to_lost_type_at_draft() {
        let customers = cohort(Segment::Lost, 3);
        let draft = select_campaign(Segment::Lost, &customers, None).unwrap();

        assert_eq!(draft.campaign_type, CampaignType::Lost);
        assert_eq!(draft.target_customers.len(), 3);
        assert_eq!(draft.into_campaign().status(), CampaignStatus::Draft);
    }

    #[test]
    fn test_caller_override_wins() {
        let customers = cohort(Segment::Champion, 2);
        let draft =
            select_campaign(Segment::Champion, &customers, Some(CampaignType::Referral)).unwrap();
        assert_eq!(draft.campaign_type, CampaignType::Referral);
    }

    #[test]
    fn test_intent_matches_chosen_type() {
        let customers = cohort(Segment::AtRisk, 1);
        let draft = select_campaign(Segment::AtRisk, &customers, None).unwrap();
        assert_eq!(
            draft.intent,
            MessageIntent::for_campaign_type(CampaignType::AtRisk)
        );
    }
}
