//! What the server can answer for a request target.
//!
//! Local files come from the [`sandbox`]; targets missing locally are looked
//! up in the [`redirect`] table. A [`Catalog`] is built once at startup and
//! shared read-only by every connection.

pub mod redirect;
pub mod sandbox;

use std::path::Path;
use std::sync::Arc;

pub use redirect::{RedirectEntry, RedirectTable};
pub use sandbox::{Resolution, Sandbox};

use crate::config::Config;
use crate::http::response::CannedResponses;

#[derive(Debug, Clone)]
pub struct Catalog {
    pub sandbox: Sandbox,
    pub redirects: RedirectTable,
    pub responses: CannedResponses,
}

impl Catalog {
    pub fn new(root: Arc<Path>, redirects: RedirectTable, responses: CannedResponses) -> Self {
        Self {
            sandbox: Sandbox::new(root),
            redirects,
            responses,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.root.clone(),
            RedirectTable::new(&cfg.redirect_table),
            CannedResponses::new(cfg.settings.server_name.as_str()),
        )
    }
}
