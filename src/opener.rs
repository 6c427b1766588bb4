//! Opening result links in the host's default handler.

/// Hands a URL to something that can display it
pub trait LinkOpener {
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// Opens links with the operating system's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        open::that_detached(url)?;
        Ok(())
    }
}
