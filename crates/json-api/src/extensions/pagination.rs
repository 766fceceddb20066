//! Query-string pagination parsing.

use dailybrew_app::pagination::Page;
use salvo::Request;

/// Read `page` / `pageSize` query parameters, clamped to sane bounds.
pub(crate) fn page_param(req: &mut Request, default_page_size: u32) -> Page {
    let page = req.query::<u32>("page").unwrap_or(1);
    let page_size = req.query::<u32>("pageSize").unwrap_or(default_page_size);

    Page::new(page, page_size)
}
