//! Authored decision tables for the Blueprint configurator.
//!
//! Values are business copy and are reproduced as written; nothing here is
//! computed. Columns follow [`Size::ALL`](super::Size::ALL) order and rows
//! follow each track's priority order.

use super::Track;

/// A row whose value depends only on the size facet.
pub struct SizeRow {
    pub label: &'static str,
    pub values: [&'static str; 3],
}

/// A row whose value depends only on the priority facet.
pub struct PriorityRow {
    pub label: &'static str,
    pub values: [&'static str; 4],
}

/// The full decision table for one track.
pub struct TrackTable {
    pub primary: SizeRow,
    pub by_priority: PriorityRow,
    pub by_size: [SizeRow; 2],
}

pub const SECURITY: TrackTable = TrackTable {
    primary: SizeRow {
        label: "Cameras",
        values: ["2-4", "4-8", "8-16+"],
    },
    by_priority: PriorityRow {
        label: "Camera Type",
        values: [
            "Starlight + IR Cameras",
            "High Resolution (4MP+)",
            "Wide-Angle Entry Cameras",
            "HD Analog Cameras",
        ],
    },
    by_size: [
        SizeRow {
            label: "Storage",
            values: ["7-14 days", "14-30 days", "30+ days"],
        },
        SizeRow {
            label: "Recorder",
            values: ["4-Channel DVR/NVR", "8-Channel NVR", "16-Channel NVR"],
        },
    ],
};

pub const NETWORKING: TrackTable = TrackTable {
    primary: SizeRow {
        label: "Access Points",
        values: ["1-2", "3-5", "6-10+"],
    },
    by_priority: PriorityRow {
        label: "Setup",
        values: [
            "Router + Managed Switch",
            "Mesh Wi-Fi System",
            "Wi-Fi 6 + Cat6 Cabling",
            "Router + Range Extender",
        ],
    },
    by_size: [
        SizeRow {
            label: "Wired Points",
            values: ["1-2", "4-8", "12-24+"],
        },
        SizeRow {
            label: "Switch",
            values: ["5-Port Unmanaged", "8-Port Gigabit", "24-Port Managed"],
        },
    ],
};

pub const SOLAR: TrackTable = TrackTable {
    primary: SizeRow {
        label: "System Size",
        values: ["1-2 kW", "3-5 kW", "6-10 kW"],
    },
    by_priority: PriorityRow {
        label: "System Type",
        values: [
            "Hybrid Inverter + Battery",
            "On-Grid + Net Metering",
            "High-Efficiency Mono Panels",
            "Off-Grid Starter Kit",
        ],
    },
    by_size: [
        SizeRow {
            label: "Backup",
            values: ["3-5 hours", "6-8 hours", "8+ hours"],
        },
        SizeRow {
            label: "Covers",
            values: [
                "Lights, fans, router",
                "Lights, fans, TV, fridge",
                "Full home/office load",
            ],
        },
    ],
};

pub const DIGITAL: TrackTable = TrackTable {
    primary: SizeRow {
        label: "Package",
        values: ["Essential Digital", "Standard Digital", "Recommended Digital"],
    },
    by_priority: PriorityRow {
        label: "Focus",
        values: [
            "Website + Google Business",
            "POS & Billing",
            "Inventory + Reporting Automation",
            "Landing Page Starter",
        ],
    },
    by_size: [
        SizeRow {
            label: "Users",
            values: ["1-2", "3-10", "10+ / multi-branch"],
        },
        SizeRow {
            label: "Support",
            values: ["1 month", "3 months", "6 months"],
        },
    ],
};

pub fn for_track(track: Track) -> &'static TrackTable {
    match track {
        Track::Security => &SECURITY,
        Track::Networking => &NETWORKING,
        Track::Solar => &SOLAR,
        Track::Digital => &DIGITAL,
    }
}
