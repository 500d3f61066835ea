use pforge_domain::brand::BrandPalette;

/// Published on the event bus after a client's palette was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandChanged {
    pub client_id: String,
    pub palette: BrandPalette,
}
