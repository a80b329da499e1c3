//! Paginated listings and lookups.

use rusqlite::Connection;
use serde::Serialize;

use crate::config::PageLimits;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::person::{Capability, Group, Person};
use crate::reservation::{Requester, Reservation, ReservationStatus};
use crate::resource::{ResourceCategory, ResourceInstance};

/// A requested page, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page; `None` uses the configured default.
    pub page_size: Option<u32>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u32, page_size: Option<u32>) -> Self {
        Self { page, page_size }
    }

    /// Resolves the effective page size and row offset.
    ///
    /// Sizes above the configured maximum are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for page 0 or a page size of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::config::PageLimits;
    /// use slotbook::operations::PageRequest;
    ///
    /// let limits = PageLimits { default_page_size: 10, max_page_size: 100 };
    /// assert_eq!(PageRequest::new(3, None).resolve(limits).unwrap(), (10, 20));
    /// assert_eq!(PageRequest::new(1, Some(500)).resolve(limits).unwrap(), (100, 0));
    /// ```
    pub fn resolve(&self, limits: PageLimits) -> Result<(u32, u64)> {
        if self.page == 0 {
            return Err(Error::Validation {
                field: "page".into(),
                message: "pages are numbered from 1".into(),
            });
        }
        let size = self.page_size.unwrap_or(limits.default_page_size);
        if size == 0 {
            return Err(Error::Validation {
                field: "page_size".into(),
                message: "page size must be at least 1".into(),
            });
        }
        let size = size.min(limits.max_page_size);
        let offset = u64::from(self.page - 1) * u64::from(size);
        Ok((size, offset))
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number, starting at 1.
    pub page: u32,
    /// Effective page size.
    pub page_size: u32,
    /// Total matching items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// Whether a later page has items.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// A reservation with the people behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationDetails {
    /// The reservation.
    pub reservation: Reservation,
    /// The individual requester, or every team member.
    pub members: Vec<Person>,
}

/// Lists bookings newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] for a standard caller,
/// [`Error::Validation`] for a bad page request, or a database error.
pub fn list_bookings(
    conn: &Connection,
    capability: Capability,
    limits: PageLimits,
    status: Option<ReservationStatus>,
    request: PageRequest,
) -> Result<Page<Reservation>> {
    capability.require("list bookings")?;
    let (page_size, offset) = request.resolve(limits)?;
    Ok(Page {
        items: Database::list_reservations(conn, status, page_size, offset)?,
        page: request.page,
        page_size,
        total: Database::count_reservations(conn, status)?,
    })
}

/// Lists persons, most recently created first.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] for a standard caller,
/// [`Error::Validation`] for a bad page request, or a database error.
pub fn list_persons(
    conn: &Connection,
    capability: Capability,
    limits: PageLimits,
    request: PageRequest,
) -> Result<Page<Person>> {
    capability.require("list persons")?;
    let (page_size, offset) = request.resolve(limits)?;
    Ok(Page {
        items: Database::list_persons(conn, page_size, offset)?,
        page: request.page,
        page_size,
        total: Database::count_persons(conn)?,
    })
}

/// Lists resource instances in ascending id order.
///
/// # Errors
///
/// Returns a database error.
pub fn list_resources(
    conn: &Connection,
    category: Option<ResourceCategory>,
) -> Result<Vec<ResourceInstance>> {
    Database::list_resources(conn, category)
}

/// Looks up one booking with its requester details.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] for a standard caller,
/// [`Error::NotFound`] for an unknown id, or a database error.
pub fn get_reservation(
    conn: &Connection,
    capability: Capability,
    id: i64,
) -> Result<ReservationDetails> {
    capability.require("view booking")?;
    let reservation = Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("booking {id}"),
    })?;

    let members = match reservation.requester() {
        Requester::Person { id, .. } => Database::get_person(conn, *id)?.into_iter().collect(),
        Requester::Group { id, .. } => Database::get_group(conn, *id)?
            .map(|group: Group| group.members)
            .unwrap_or_default(),
    };
    Ok(ReservationDetails {
        reservation,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_person, seed_resource, slot_at};

    fn limits() -> PageLimits {
        PageLimits {
            default_page_size: 2,
            max_page_size: 3,
        }
    }

    #[test]
    fn test_page_request_resolve() {
        assert_eq!(PageRequest::default().resolve(limits()).unwrap(), (2, 0));
        assert_eq!(PageRequest::new(2, Some(3)).resolve(limits()).unwrap(), (3, 3));
        assert_eq!(PageRequest::new(2, Some(50)).resolve(limits()).unwrap(), (3, 3));
        assert!(PageRequest::new(0, None).resolve(limits()).is_err());
        assert!(PageRequest::new(1, Some(0)).resolve(limits()).is_err());
    }

    #[test]
    fn test_page_arithmetic() {
        let page = Page::<()> {
            items: vec![],
            page: 1,
            page_size: 10,
            total: 21,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());

        let last = Page::<()> { page: 3, ..page };
        assert!(!last.has_next());

        let empty = Page::<()> {
            items: vec![],
            page: 1,
            page_size: 10,
            total: 0,
        };
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_list_bookings_pages() {
        let db = create_test_database();
        let conn = db.connection();
        let desk = seed_resource(conn, "S1", ResourceCategory::Shared, 4);
        for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
            let person = seed_person(conn, name, 30);
            let hour = 9 + u32::try_from(i).unwrap();
            let r = Reservation::builder(
                desk.id,
                Requester::Person {
                    id: person.id,
                    name: person.name,
                },
                slot_at(hour),
            )
            .build()
            .unwrap();
            Database::insert_reservation(conn, &r).unwrap();
        }

        let first = list_bookings(conn, Capability::Privileged, limits(), None, PageRequest::default())
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total, 3);
        assert!(first.has_next());

        let second = list_bookings(
            conn,
            Capability::Privileged,
            limits(),
            None,
            PageRequest::new(2, None),
        )
        .unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next());

        let cancelled = list_bookings(
            conn,
            Capability::Privileged,
            limits(),
            Some(ReservationStatus::Cancelled),
            PageRequest::default(),
        )
        .unwrap();
        assert_eq!(cancelled.total, 0);

        assert!(matches!(
            list_bookings(conn, Capability::Standard, limits(), None, PageRequest::default()),
            Err(Error::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_list_persons_requires_privilege() {
        let db = create_test_database();
        let conn = db.connection();
        seed_person(conn, "a", 30);
        seed_person(conn, "b", 30);

        let page = list_persons(conn, Capability::Privileged, limits(), PageRequest::default())
            .unwrap();
        assert_eq!(page.items[0].name, "b");
        assert!(list_persons(conn, Capability::Standard, limits(), PageRequest::default()).is_err());
    }

    #[test]
    fn test_get_reservation_details() {
        let db = create_test_database();
        let conn = db.connection();
        let room = seed_resource(conn, "C1", ResourceCategory::Conference, 1);
        let members: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|n| seed_person(conn, n, 30))
            .collect();
        let group = Database::create_group(conn, "core", members).unwrap();
        let r = Reservation::builder(
            room.id,
            Requester::Group {
                id: group.id,
                name: group.name.clone(),
            },
            slot_at(10),
        )
        .build()
        .unwrap();
        let id = Database::insert_reservation(conn, &r).unwrap();

        let details = get_reservation(conn, Capability::Privileged, id).unwrap();
        assert_eq!(details.members.len(), 3);
        assert_eq!(details.reservation.resource_label(), "C1");

        assert!(matches!(
            get_reservation(conn, Capability::Privileged, id + 1),
            Err(Error::NotFound { .. })
        ));
    }
}
