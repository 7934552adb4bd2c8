//! Opening result links outside the client

use std::io;

/// Something that can open a URL externally
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens links in the system browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that_detached(url)
    }
}
