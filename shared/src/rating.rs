//! What the activity detail view lets the current user do with ratings.

use crate::{Activity, ActivityRating, User};

/// Rating options offered to the viewer of an activity
#[derive(Debug, Clone, PartialEq)]
pub enum RatingEligibility {
    /// Nobody is signed in; the ratings list is read-only
    Anonymous,
    /// The viewer already rated this activity and may edit or delete it
    AlreadyRated(ActivityRating),
    /// The server allows the viewer to add a rating
    CanRate,
    /// Rating is refused; the reason explains why
    NotAllowed(RefusalReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The viewer created the activity
    OwnActivity,
    /// The viewer has no trip to the activity's place
    PlaceNotVisited,
}

impl RefusalReason {
    pub fn message(&self) -> &'static str {
        match self {
            RefusalReason::OwnActivity => "Vous ne pouvez pas noter votre propre activité.",
            RefusalReason::PlaceNotVisited => {
                "Vous devez avoir visité ce lieu pour pouvoir noter ses activités."
            }
        }
    }
}

/// Finds the viewer's own rating among an activity's ratings
pub fn find_user_rating<'a>(activity: &'a Activity, user: &User) -> Option<&'a ActivityRating> {
    activity
        .notes
        .iter()
        .find(|rating| rating.utilisateur.as_ref().is_some_and(|u| u.id == user.id))
}

/// Derives the rating options for `viewer` on `activity`.
///
/// An existing rating always wins so it can be edited even after the
/// server stops granting `can_rate`. Otherwise only an explicit
/// `can_rate == Some(true)` lets the viewer rate.
pub fn rating_eligibility(activity: &Activity, viewer: Option<&User>) -> RatingEligibility {
    let Some(user) = viewer else {
        return RatingEligibility::Anonymous;
    };

    if let Some(existing) = find_user_rating(activity, user) {
        return RatingEligibility::AlreadyRated(existing.clone());
    }

    if activity.can_rate == Some(true) {
        return RatingEligibility::CanRate;
    }

    let is_creator = activity
        .cree_par
        .as_ref()
        .is_some_and(|creator| creator.username == user.username);
    if is_creator {
        RatingEligibility::NotAllowed(RefusalReason::OwnActivity)
    } else {
        RatingEligibility::NotAllowed(RefusalReason::PlaceNotVisited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visited::fixtures::place;
    use crate::{ActivityKind, UserRef};
    use uuid::Uuid;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            profile_image: None,
        }
    }

    fn activity(creator: &str, can_rate: Option<bool>, notes: Vec<ActivityRating>) -> Activity {
        Activity {
            id: Uuid::from_u128(42),
            titre: "Croisière".to_string(),
            description: "Sur la Seine".to_string(),
            lieu: place(1, "Paris", "FR", "France"),
            cree_par: Some(UserRef {
                id: 99,
                username: creator.to_string(),
            }),
            date_creation: None,
            prix_estime: None,
            age_minimum: None,
            type_activite: ActivityKind::Autre,
            adresse_precise: String::new(),
            transport_public: false,
            reservation_requise: false,
            medias: Vec::new(),
            notes,
            note_moyenne: None,
            nombre_notes: 0,
            can_rate,
        }
    }

    fn rating_by(user_id: i64, note: u8) -> ActivityRating {
        ActivityRating {
            id: Uuid::from_u128(7),
            note,
            commentaire: "Super".to_string(),
            utilisateur: Some(UserRef {
                id: user_id,
                username: format!("user{}", user_id),
            }),
            date_creation: None,
        }
    }

    #[test]
    fn test_anonymous_viewer_cannot_rate() {
        let activity = activity("alice", Some(true), vec![]);
        assert_eq!(rating_eligibility(&activity, None), RatingEligibility::Anonymous);
    }

    #[test]
    fn test_server_flag_grants_rating() {
        let activity = activity("alice", Some(true), vec![]);
        let bob = user(2, "bob");
        assert_eq!(rating_eligibility(&activity, Some(&bob)), RatingEligibility::CanRate);
    }

    #[test]
    fn test_existing_rating_takes_precedence() {
        let activity = activity("alice", Some(false), vec![rating_by(1, 3), rating_by(2, 5)]);
        let bob = user(2, "bob");
        match rating_eligibility(&activity, Some(&bob)) {
            RatingEligibility::AlreadyRated(rating) => assert_eq!(rating.note, 5),
            other => panic!("unexpected eligibility: {:?}", other),
        }
    }

    #[test]
    fn test_creator_is_told_they_cannot_rate_own_activity() {
        let activity = activity("alice", Some(false), vec![]);
        let alice = user(1, "alice");
        let eligibility = rating_eligibility(&activity, Some(&alice));
        assert_eq!(
            eligibility,
            RatingEligibility::NotAllowed(RefusalReason::OwnActivity)
        );
    }

    #[test]
    fn test_missing_flag_means_place_not_visited() {
        let activity = activity("alice", None, vec![]);
        let bob = user(2, "bob");
        assert_eq!(
            rating_eligibility(&activity, Some(&bob)),
            RatingEligibility::NotAllowed(RefusalReason::PlaceNotVisited)
        );
        assert!(RefusalReason::PlaceNotVisited.message().contains("visité"));
    }
}
