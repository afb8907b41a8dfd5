//! Cursor-based windows over ordered query results.
//!
//! Two cursor flavours are in use. Transaction pages carry the hash of the
//! *last* item the client has seen ([`page_after`]). Asset and account detail
//! pages carry the *first* item of the page to return ([`page_from`]).

use derive_more::Display;

/// Unknown cursor error.
///
/// Happens when the client sends a cursor which matches no item of the result.
#[derive(Debug, Display, thiserror::Error, Copy, Clone, PartialEq, Eq)]
#[display(fmt = "Unknown cursor")]
pub struct UnknownCursor;

/// One page of an ordered result.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'items, T> {
    /// Items of the page, in result order.
    pub items: &'items [T],
    /// Item identifying the next page, when there is one.
    pub next: Option<&'items T>,
}

/// Up to `page_size` items following the one whose key equals `cursor`,
/// or from the head when there is no cursor.
///
/// A page holding exactly `page_size` items names its last item as the
/// cursor of the next page; a shorter page is the last one.
///
/// # Errors
/// If no item has the `cursor` key.
pub fn page_after<'items, T, K>(
    items: &'items [T],
    key: impl Fn(&T) -> &K,
    cursor: Option<&K>,
    page_size: usize,
) -> Result<Page<'items, T>, UnknownCursor>
where
    K: PartialEq + ?Sized,
{
    let start = match cursor {
        Some(cursor) => position_of(items, &key, cursor)? + 1,
        None => 0,
    };
    let items = &items[start..start.saturating_add(page_size).min(items.len())];
    let next = if page_size > 0 && items.len() == page_size {
        items.last()
    } else {
        None
    };

    Ok(Page { items, next })
}

/// Up to `page_size` items starting with the one whose key equals `cursor`,
/// or from the head when there is no cursor.
///
/// The first item after the page, if any, is the cursor of the next page.
///
/// # Errors
/// If no item has the `cursor` key.
pub fn page_from<'items, T, K>(
    items: &'items [T],
    key: impl Fn(&T) -> &K,
    cursor: Option<&K>,
    page_size: usize,
) -> Result<Page<'items, T>, UnknownCursor>
where
    K: PartialEq + ?Sized,
{
    let start = match cursor {
        Some(cursor) => position_of(items, &key, cursor)?,
        None => 0,
    };
    let end = start.saturating_add(page_size).min(items.len());

    Ok(Page {
        items: &items[start..end],
        next: if page_size > 0 { items.get(end) } else { None },
    })
}

fn position_of<T, K>(items: &[T], key: impl Fn(&T) -> &K, cursor: &K) -> Result<usize, UnknownCursor>
where
    K: PartialEq + ?Sized,
{
    items
        .iter()
        .position(|item| key(item) == cursor)
        .ok_or(UnknownCursor)
}
