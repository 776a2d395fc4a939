//! Object catalog
//!
//! A fixed, ordered table of pointable bodies. Order is significant: the UI
//! shows two entries per page, so entry `i` lives on page `i / 2`.

/// Number of entries shown on one page
pub const SLOTS_PER_PAGE: usize = 2;

/// A pointable body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CatalogEntry {
    /// Name sent to the coordinate host (case-sensitive)
    pub name: &'static str,
    /// Ephemeris body identifier used by the host
    pub horizons_id: &'static str,
}

impl CatalogEntry {
    pub const fn new(name: &'static str, horizons_id: &'static str) -> Self {
        Self { name, horizons_id }
    }
}

/// Planets, dwarf planets and major moons, in display order
pub static SOLAR_SYSTEM: [CatalogEntry; 24] = [
    CatalogEntry::new("Sun", "10"),
    CatalogEntry::new("Mercury", "199"),
    CatalogEntry::new("Venus", "299"),
    CatalogEntry::new("Mars", "499"),
    CatalogEntry::new("Jupiter", "599"),
    CatalogEntry::new("Saturn", "699"),
    CatalogEntry::new("Uranus", "799"),
    CatalogEntry::new("Neptune", "899"),
    CatalogEntry::new("Pluto", "999"),
    CatalogEntry::new("Ceres", "2000001"),
    CatalogEntry::new("Moon", "301"),
    CatalogEntry::new("Phobos", "401"),
    CatalogEntry::new("Deimos", "402"),
    CatalogEntry::new("Io", "501"),
    CatalogEntry::new("Europa", "502"),
    CatalogEntry::new("Ganymede", "503"),
    CatalogEntry::new("Callisto", "504"),
    CatalogEntry::new("Titan", "606"),
    CatalogEntry::new("Rhea", "605"),
    CatalogEntry::new("Iapetus", "608"),
    CatalogEntry::new("Enceladus", "602"),
    CatalogEntry::new("Titania", "703"),
    CatalogEntry::new("Oberon", "704"),
    CatalogEntry::new("Triton", "801"),
];

/// Read-only view over an ordered entry table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::solar_system()
    }
}

impl Catalog {
    /// Wrap an entry table
    pub const fn new(entries: &'static [CatalogEntry]) -> Self {
        Self { entries }
    }

    /// The built-in 24-entry table
    pub const fn solar_system() -> Self {
        Self::new(&SOLAR_SYSTEM)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&'static CatalogEntry> {
        self.entries.get(index)
    }

    /// Look an entry up by exact name
    pub fn find(&self, name: &str) -> Option<(usize, &'static CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static CatalogEntry> {
        self.entries.iter()
    }

    /// Number of pages; at least one so an empty catalog still has a page 0
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(SLOTS_PER_PAGE).max(1)
    }

    /// Highest valid page number
    pub fn max_page(&self) -> usize {
        self.page_count() - 1
    }

    /// Index of the left slot on `page`
    pub const fn left_slot(page: usize) -> usize {
        page * SLOTS_PER_PAGE
    }

    /// Index of the right slot on `page`
    pub const fn right_slot(page: usize) -> usize {
        Self::left_slot(page) + 1
    }

    /// Page an entry index is shown on
    pub const fn page_of(index: usize) -> usize {
        index / SLOTS_PER_PAGE
    }

    /// Entries shown on `page`; either slot may be empty
    pub fn page(
        &self,
        page: usize,
    ) -> (Option<&'static CatalogEntry>, Option<&'static CatalogEntry>) {
        (
            self.get(Self::left_slot(page)),
            self.get(Self::right_slot(page)),
        )
    }
}
