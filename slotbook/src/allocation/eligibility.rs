//! Category and headcount rules.
//!
//! Pure functions; evaluated in order, the first failure wins.

use crate::error::{Error, Result};
use crate::person::Person;
use crate::reservation::RequesterKind;
use crate::resource::ResourceCategory;

/// Members younger than this count toward a team but not toward its
/// eligible headcount.
pub const MIN_ELIGIBLE_AGE: u32 = 10;

/// Eligible members a team needs to book a conference room.
pub const MIN_CONFERENCE_HEADCOUNT: usize = 3;

/// Checks that the requester kind may book the category.
///
/// # Errors
///
/// Returns [`Error::CategoryMismatch`] when it may not.
pub fn check_category(category: ResourceCategory, kind: RequesterKind) -> Result<()> {
    if category.required_kind() == kind {
        Ok(())
    } else {
        Err(Error::CategoryMismatch { category, kind })
    }
}

/// Number of members old enough to count toward the headcount.
#[must_use]
pub fn eligible_headcount(members: &[Person]) -> usize {
    members
        .iter()
        .filter(|m| m.age >= MIN_ELIGIBLE_AGE)
        .count()
}

/// Minimum eligible headcount for a category, if it has one.
#[must_use]
pub const fn required_headcount(category: ResourceCategory) -> Option<usize> {
    match category {
        ResourceCategory::Conference => Some(MIN_CONFERENCE_HEADCOUNT),
        ResourceCategory::Private | ResourceCategory::Shared => None,
    }
}

/// Runs the category rule, then the headcount rule.
///
/// `members` is the resolved set of people behind the request: one person
/// for an individual, every unique member for a team.
///
/// # Errors
///
/// Returns [`Error::CategoryMismatch`] or
/// [`Error::InsufficientEligibleMembers`].
///
/// # Examples
///
/// ```
/// use slotbook::allocation::eligibility::check_eligibility;
/// use slotbook::{Error, Person, RequesterKind, ResourceCategory, Role};
///
/// let member = |id, age| Person { id, name: format!("m{id}"), age, gender: None, role: Role::User };
/// let team = vec![member(1, 30), member(2, 9), member(3, 40)];
///
/// let err = check_eligibility(ResourceCategory::Conference, RequesterKind::Team, &team).unwrap_err();
/// assert!(matches!(err, Error::InsufficientEligibleMembers { required: 3, eligible: 2 }));
/// ```
pub fn check_eligibility(
    category: ResourceCategory,
    kind: RequesterKind,
    members: &[Person],
) -> Result<()> {
    check_category(category, kind)?;

    if let Some(required) = required_headcount(category) {
        let eligible = eligible_headcount(members);
        if eligible < required {
            return Err(Error::InsufficientEligibleMembers { required, eligible });
        }
    }
    Ok(())
}
