//! In-page navigation: section anchors, smooth-scroll targets and the
//! "active" nav item.
//!
//! The browser does the actual scrolling; this module only computes where to
//! scroll to and which section the header should highlight.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BlueprintError;

/// Header height in pixels on desktop.
pub const HEADER_HEIGHT: f64 = 72.0;
/// Header height once the page has scrolled past [`SCROLL_THRESHOLD`].
pub const HEADER_HEIGHT_SCROLLED: f64 = 64.0;
/// Pixels to scroll before the header shrinks.
pub const SCROLL_THRESHOLD: f64 = 40.0;

/// Extra gap left above a section after scrolling to it from the nav bar.
const SCROLL_GAP: f64 = 10.0;
/// Fixed offset used by the in-section call-to-action buttons.
pub const CTA_HEADER_OFFSET: f64 = 80.0;
/// Gap between the header and the top of the observed band.
const OBSERVER_TOP_GAP: f64 = 20.0;
/// Share of the viewport, from the bottom, that is ignored when deciding
/// which section is active.
const OBSERVER_BOTTOM_MARGIN: f64 = 0.6;
/// Share of a section that has to be inside the band to count as visible.
const OBSERVER_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    Solutions,
    Blueprint,
    Services,
    Packages,
    Projects,
    Testimonials,
    Why,
    Team,
    Gallery,
    Digital,
    Faq,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 13] = [
        SectionId::Home,
        SectionId::Solutions,
        SectionId::Blueprint,
        SectionId::Services,
        SectionId::Packages,
        SectionId::Projects,
        SectionId::Testimonials,
        SectionId::Why,
        SectionId::Team,
        SectionId::Gallery,
        SectionId::Digital,
        SectionId::Faq,
        SectionId::Contact,
    ];

    /// The element id, without the leading `#`.
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Solutions => "solutions",
            SectionId::Blueprint => "blueprint",
            SectionId::Services => "services",
            SectionId::Packages => "packages",
            SectionId::Projects => "projects",
            SectionId::Testimonials => "testimonials",
            SectionId::Why => "why",
            SectionId::Team => "team",
            SectionId::Gallery => "gallery",
            SectionId::Digital => "digital",
            SectionId::Faq => "faq",
            SectionId::Contact => "contact",
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.anchor())
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchor = s.trim().trim_start_matches('#');
        SectionId::ALL
            .into_iter()
            .find(|section| section.anchor().eq_ignore_ascii_case(anchor))
            .ok_or_else(|| BlueprintError::invalid("section", format!("no section '{s}'")))
    }
}

/// An entry in the header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 9] = [
    NavItem {
        id: SectionId::Home,
        label: "Home",
    },
    NavItem {
        id: SectionId::Solutions,
        label: "Solutions",
    },
    NavItem {
        id: SectionId::Blueprint,
        label: "Blueprint",
    },
    NavItem {
        id: SectionId::Services,
        label: "Services",
    },
    NavItem {
        id: SectionId::Packages,
        label: "Packages",
    },
    NavItem {
        id: SectionId::Projects,
        label: "Projects",
    },
    NavItem {
        id: SectionId::Why,
        label: "Why Us",
    },
    NavItem {
        id: SectionId::Faq,
        label: "FAQ",
    },
    NavItem {
        id: SectionId::Contact,
        label: "Contact",
    },
];

/// Position of a rendered section, relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

/// What started a smooth scroll. The nav bar and the call-to-action buttons
/// leave different gaps above the target section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollOrigin {
    #[default]
    Nav,
    CallToAction,
}

impl ScrollOrigin {
    /// Pixels kept between the top of the viewport and the section.
    pub fn header_offset(&self) -> f64 {
        match self {
            ScrollOrigin::Nav => HEADER_HEIGHT + SCROLL_GAP,
            ScrollOrigin::CallToAction => CTA_HEADER_OFFSET,
        }
    }
}

/// Page offset to smooth-scroll to so the section clears the fixed header.
pub fn scroll_offset(element_top: f64, page_y_offset: f64) -> f64 {
    scroll_offset_from(ScrollOrigin::Nav, element_top, page_y_offset)
}

pub fn scroll_offset_from(origin: ScrollOrigin, element_top: f64, page_y_offset: f64) -> f64 {
    element_top + page_y_offset - origin.header_offset()
}

/// Scroll target for a section, if it is on the page.
///
/// A section that is not rendered is a no-op rather than an error.
pub fn scroll_target(
    layouts: &[SectionLayout],
    id: SectionId,
    page_y_offset: f64,
) -> Option<f64> {
    scroll_target_from(layouts, id, page_y_offset, ScrollOrigin::Nav)
}

pub fn scroll_target_from(
    layouts: &[SectionLayout],
    id: SectionId,
    page_y_offset: f64,
    origin: ScrollOrigin,
) -> Option<f64> {
    layouts
        .iter()
        .find(|layout| layout.id == id)
        .map(|layout| scroll_offset_from(origin, layout.top, page_y_offset))
}

/// Whether the header should switch to its compact form.
pub fn is_scrolled(page_y_offset: f64) -> bool {
    page_y_offset > SCROLL_THRESHOLD
}

pub fn header_height(page_y_offset: f64) -> f64 {
    if is_scrolled(page_y_offset) {
        HEADER_HEIGHT_SCROLLED
    } else {
        HEADER_HEIGHT
    }
}

/// Fraction of a section inside the observed band of the viewport.
fn visible_ratio(layout: &SectionLayout, viewport_height: f64) -> f64 {
    if layout.height <= 0.0 {
        return 0.0;
    }
    let band_top = HEADER_HEIGHT + OBSERVER_TOP_GAP;
    let band_bottom = viewport_height * (1.0 - OBSERVER_BOTTOM_MARGIN);
    let overlap = (layout.top + layout.height).min(band_bottom) - layout.top.max(band_top);
    overlap.max(0.0) / layout.height
}

/// The section the header should highlight.
///
/// Among sections with enough of their height inside the observed band, the
/// one closest to the top wins. When none qualifies the current highlight
/// stays; with no current highlight the first observed section is used.
pub fn active_section(
    layouts: &[SectionLayout],
    viewport_height: f64,
    current: Option<SectionId>,
) -> Option<SectionId> {
    layouts
        .iter()
        .filter(|layout| visible_ratio(layout, viewport_height) >= OBSERVER_THRESHOLD)
        .min_by(|a, b| a.top.total_cmp(&b.top))
        .map(|layout| layout.id)
        .or(current)
        .or_else(|| layouts.first().map(|layout| layout.id))
}
