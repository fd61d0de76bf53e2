//! Pure play-eligibility rules.
//!
//! Everything the decision depends on is gathered up front into an
//! [`EligibilitySnapshot`]; [`evaluate`] performs no I/O and reads no clock.

use crate::domain::types::{
    BlockReason, Course, Decision, EntitlementSource, SinglePlayCredit, SubscriptionSnapshot,
};

/// Inputs for one (player, course, day) decision.
#[derive(Debug, Clone)]
pub struct EligibilitySnapshot<'a> {
    pub course: &'a Course,
    pub subscription: &'a SubscriptionSnapshot,
    /// A shot already exists for this player and course on the current day.
    pub played_course_today: bool,
    /// The player already redeemed some credit on the current day.
    pub redeemed_credit_today: bool,
    /// The player's unredeemed credits, any order.
    pub unredeemed_credits: &'a [SinglePlayCredit],
}

/// Decide whether a shot may be logged and what funds it.
///
/// Rule order:
/// 1. a coming-soon course blocks everyone;
/// 2. subscribers are limited only by one shot per course per day, and never
///    spend credits;
/// 3. non-subscribers who already redeemed a credit today are capped for the day
///    at every course;
/// 4. otherwise one shot per course per day, funded by the oldest credit.
pub fn evaluate(snapshot: &EligibilitySnapshot<'_>) -> Decision {
    if snapshot.course.coming_soon {
        return Decision::Blocked(BlockReason::CourseNotOpen);
    }

    if snapshot.subscription.active {
        if snapshot.played_course_today {
            return Decision::Blocked(BlockReason::AlreadyPlayedToday);
        }
        return Decision::Allowed(EntitlementSource::Subscription);
    }

    if snapshot.redeemed_credit_today {
        return Decision::Blocked(BlockReason::CreditAlreadyUsedToday);
    }
    if snapshot.played_course_today {
        return Decision::Blocked(BlockReason::AlreadyPlayedToday);
    }

    match oldest_unredeemed(snapshot.unredeemed_credits) {
        Some(credit) => Decision::Allowed(EntitlementSource::SinglePlayCredit(credit.id)),
        None => Decision::Blocked(BlockReason::NoEntitlement),
    }
}

/// Oldest purchase first; ties broken by id so the choice is deterministic.
pub fn oldest_unredeemed(credits: &[SinglePlayCredit]) -> Option<&SinglePlayCredit> {
    credits
        .iter()
        .filter(|c| !c.is_redeemed())
        .min_by_key(|c| (c.purchased_at, c.id))
}
