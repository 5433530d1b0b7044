//! The package catalog and package inquiries.
//!
//! Each track offers four authored packages. A visitor picks one, optionally
//! answers a few track-specific questions, and sends the inquiry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BlueprintError;
use crate::blueprint::{Size, SpaceType, Track};
use crate::message::OutboundMessage;

pub const INQUIRY_CLOSING: &str = "_Please confirm site survey / next steps._";
const NOT_SPECIFIED: &str = "Not specified";

/// A fixed offer within a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub recommended: bool,
    pub short_desc: &'static str,
    pub customer_feeling: &'static str,
    pub best_for: &'static str,
    pub includes: &'static [&'static str],
    pub technical_details: &'static str,
}

const SECURITY_PACKAGES: [Package; 4] = [
    Package {
        id: "essential-security",
        name: "Essential Security",
        recommended: false,
        short_desc: "2–4 cameras",
        customer_feeling: "I need basic coverage for entry points.",
        best_for: "Small shops, homes, single entry points",
        includes: &[
            "2–4 cameras (Analog/Wi-Fi/IP based on budget)",
            "Basic DVR/NVR recorder",
            "Mobile app viewing",
            "Night vision coverage",
            "1 week storage",
        ],
        technical_details: "System recommendation based on budget + wiring preference",
    },
    Package {
        id: "standard-security",
        name: "Standard Security",
        recommended: false,
        short_desc: "4 cameras",
        customer_feeling: "I want clear coverage of key areas.",
        best_for: "Retail stores, small offices, clinics",
        includes: &[
            "4 IP cameras (Wi-Fi if wiring difficult)",
            "HD quality recording",
            "Advanced mobile app",
            "Motion detection alerts",
            "2 weeks storage",
            "Professional installation",
        ],
        technical_details: "IP cameras recommended, Wi-Fi option available",
    },
    Package {
        id: "recommended-security",
        name: "Recommended Security",
        recommended: true,
        short_desc: "6–8 cameras",
        customer_feeling: "I want complete indoor + outdoor monitoring.",
        best_for: "Medium businesses, warehouses, multi-room spaces",
        includes: &[
            "6–8 IP cameras (indoor + outdoor)",
            "Full HD recording",
            "Extended storage (1 month)",
            "Smart motion zones",
            "Weatherproof outdoor cameras",
            "Multiple user access",
            "Free maintenance (3 months)",
        ],
        technical_details: "IP cameras best choice for quality + features",
    },
    Package {
        id: "advanced-security",
        name: "Advanced Security",
        recommended: false,
        short_desc: "8–16+ cameras",
        customer_feeling: "I need enterprise-grade surveillance.",
        best_for: "Large facilities, multi-location businesses",
        includes: &[
            "8–16+ cameras (IP/hybrid analytics)",
            "4K quality options",
            "License plate recognition",
            "Face detection (optional)",
            "Cloud backup option",
            "Centralized monitoring",
            "24/7 support + maintenance",
        ],
        technical_details: "Advanced IP with analytics capabilities",
    },
];

const SOLAR_PACKAGES: [Package; 4] = [
    Package {
        id: "essential-solar",
        name: "Essential Solar",
        recommended: false,
        short_desc: "1–2 kW",
        customer_feeling: "I want backup for basics during load shedding.",
        best_for: "Small homes, startups needing emergency power",
        includes: &[
            "1–2 kW solar system",
            "Lights, fans, router backup",
            "Phone charging",
            "CCTV power backup",
            "3–5 hours backup",
            "Basic battery storage",
        ],
        technical_details: "Entry-level backup solution",
    },
    Package {
        id: "standard-solar",
        name: "Standard Solar",
        recommended: false,
        short_desc: "3–5 kW",
        customer_feeling: "I want to reduce my electricity bill significantly.",
        best_for: "Homes, small offices with moderate usage",
        includes: &[
            "3–5 kW solar system",
            "Lights, fans, TV, fridge",
            "Small appliances",
            "6–8 hours backup",
            "Bill reduction 40–60%",
            "Hybrid inverter option",
        ],
        technical_details: "Balanced backup + savings solution",
    },
    Package {
        id: "recommended-solar",
        name: "Recommended Solar",
        recommended: true,
        short_desc: "6–10 kW",
        customer_feeling: "I want strong usage coverage + net metering.",
        best_for: "Medium homes, shops with high consumption",
        includes: &[
            "6–10 kW solar system",
            "Full home/office coverage",
            "Net metering ready",
            "Bill reduction 70–90%",
            "8+ hours backup",
            "Premium panels + inverter",
            "25-year panel warranty",
        ],
        technical_details: "Best value for long-term savings",
    },
    Package {
        id: "advanced-solar",
        name: "Advanced Solar",
        recommended: false,
        short_desc: "10–20+ kW",
        customer_feeling: "I want commercial-scale power independence.",
        best_for: "Large businesses, industrial facilities",
        includes: &[
            "10–20+ kW system",
            "Commercial scale coverage",
            "Heavy appliances + AC",
            "Net metering + grid tie",
            "Battery bank for 24/7 operation",
            "Monitoring system",
            "ROI in 2–4 years",
        ],
        technical_details: "Enterprise-grade solar solution",
    },
];

const NETWORKING_PACKAGES: [Package; 4] = [
    Package {
        id: "essential-networking",
        name: "Essential Networking",
        recommended: false,
        short_desc: "Basic Setup",
        customer_feeling: "I just need Wi-Fi working properly.",
        best_for: "Small homes, startups, basic coverage",
        includes: &[
            "Router setup + configuration",
            "Basic Wi-Fi coverage",
            "Secure password setup",
            "1–2 wired points (optional)",
            "Speed optimization",
        ],
        technical_details: "Single router, basic coverage",
    },
    Package {
        id: "standard-networking",
        name: "Standard Networking",
        recommended: false,
        short_desc: "Router + Switch",
        customer_feeling: "I want reliable Wi-Fi + wired connections.",
        best_for: "Small offices, retail, multi-room spaces",
        includes: &[
            "Router + network switch",
            "Improved Wi-Fi coverage",
            "Multiple wired points",
            "Basic security (firewall)",
            "Guest network setup",
            "Cable management",
        ],
        technical_details: "Router + unmanaged switch",
    },
    Package {
        id: "recommended-networking",
        name: "Recommended Networking",
        recommended: true,
        short_desc: "Structured Cabling",
        customer_feeling: "I want professional, organized networking.",
        best_for: "Offices, clinics, schools, multi-floor",
        includes: &[
            "Router + managed switch",
            "Structured cabling system",
            "Multiple access points",
            "Network optimization",
            "Port labeling + documentation",
            "VLAN setup (optional)",
            "3 months support",
        ],
        technical_details: "Managed switch + multiple APs",
    },
    Package {
        id: "advanced-networking",
        name: "Advanced Networking",
        recommended: false,
        short_desc: "Enterprise Grade",
        customer_feeling: "I need enterprise-level infrastructure.",
        best_for: "Large organizations, multi-location businesses",
        includes: &[
            "Enterprise router + switches",
            "VLAN + firewall configuration",
            "Redundancy + failover",
            "Centralized management",
            "Network monitoring",
            "Security hardening",
            "24/7 support + SLA",
        ],
        technical_details: "Enterprise equipment + management",
    },
];

const DIGITAL_PACKAGES: [Package; 4] = [
    Package {
        id: "essential-digital",
        name: "Essential Digital",
        recommended: false,
        short_desc: "Basic Presence",
        customer_feeling: "I just want to be visible online.",
        best_for: "Small shops, startups, service providers",
        includes: &[
            "Basic business website/landing page",
            "Google Business setup",
            "Basic digital presence",
            "Simple contact & inquiry form",
            "Mobile-responsive design",
            "Domain + hosting setup",
        ],
        technical_details: "5-page website + Google listing",
    },
    Package {
        id: "standard-digital",
        name: "Standard Digital",
        recommended: false,
        short_desc: "Professional Tools",
        customer_feeling: "I want tools to manage my business better.",
        best_for: "Retail stores, clinics, offices",
        includes: &[
            "Professional website",
            "Basic management software",
            "Online inquiry & lead handling",
            "Email & basic automation",
            "Performance & security setup",
            "Training session",
        ],
        technical_details: "Website + basic management dashboard",
    },
    Package {
        id: "recommended-digital",
        name: "Recommended Digital",
        recommended: true,
        short_desc: "Business Automation",
        customer_feeling: "I want my business organized and automated.",
        best_for: "Retail chains, schools, service companies",
        includes: &[
            "Custom software solution",
            "POS / Inventory / Billing system",
            "Website + admin dashboard",
            "Reporting & analytics",
            "User training & documentation",
            "Mobile app (optional)",
            "6 months support",
        ],
        technical_details: "Full custom system + integrations",
    },
    Package {
        id: "advanced-digital",
        name: "Advanced Digital",
        recommended: false,
        short_desc: "Digital Transformation",
        customer_feeling: "I want complete digital transformation.",
        best_for: "Large organizations, multi-location businesses",
        includes: &[
            "Fully customized ecosystem",
            "Cloud-based systems",
            "Multi-branch management",
            "Integrations (payments, ERP, CRM)",
            "Data security & backups",
            "Ongoing technical support",
            "Scalable architecture",
        ],
        technical_details: "Enterprise ecosystem + cloud infrastructure",
    },
];

/// The four packages offered for a track, smallest first.
pub fn packages(track: Track) -> &'static [Package] {
    match track {
        Track::Security => &SECURITY_PACKAGES,
        Track::Networking => &NETWORKING_PACKAGES,
        Track::Solar => &SOLAR_PACKAGES,
        Track::Digital => &DIGITAL_PACKAGES,
    }
}

pub fn find_package(track: Track, id: &str) -> Result<&'static Package, BlueprintError> {
    packages(track)
        .iter()
        .find(|package| package.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| BlueprintError::UnknownPackage {
            track: track.key().to_string(),
            id: id.to_string(),
        })
}

macro_rules! option_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value as sent in inquiry messages.
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.key())
            }
        }

        impl FromStr for $name {
            type Err = BlueprintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.key().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        let valid: Vec<&str> = $name::ALL.iter().map(|o| o.key()).collect();
                        BlueprintError::invalid(
                            $field,
                            format!("'{}' is not one of {}", s, valid.join(", ")),
                        )
                    })
            }
        }
    };
}

option_enum!(
    /// Security: how much to spend.
    BudgetFocus, "budget" {
        Budget => "budget",
        Balanced => "balanced",
        Premium => "premium",
    }
);

option_enum!(
    /// Security: whether cables can be run.
    Cabling, "cabling" {
        Wired => "wired",
        Wireless => "wireless",
    }
);

option_enum!(
    /// Solar: how long the backup should last.
    BackupGoal, "backup" {
        ThreeToFiveHours => "3-5hours",
        SixToEightHours => "6-8hours",
        Daytime => "daytime",
    }
);

option_enum!(
    /// Networking: how far the network has to reach.
    CoverageNeed, "coverage" {
        Basic => "basic",
        Strong => "strong",
        MultiFloor => "multifloor",
    }
);

option_enum!(
    /// Digital: the kind of business.
    BusinessType, "business" {
        Retail => "Retail",
        Medical => "Medical/Clinic",
        Service => "Service",
        School => "School/Education",
        Manufacturing => "Manufacturing",
        Other => "Other",
    }
);

option_enum!(
    /// Digital: what the project should achieve first.
    MainGoal, "goal" {
        Visibility => "visibility",
        Manage => "manage",
        Automation => "automation",
    }
);

/// Which kind of cameras suits the budget and wiring answers.
pub fn security_system_hint(
    budget: Option<BudgetFocus>,
    cabling: Option<Cabling>,
) -> Option<&'static str> {
    match (cabling?, budget) {
        (Cabling::Wired, Some(BudgetFocus::Budget)) => {
            Some("Analog cameras (cost-effective, wired)")
        }
        (Cabling::Wired, Some(BudgetFocus::Balanced | BudgetFocus::Premium)) => {
            Some("IP cameras (best quality, wired)")
        }
        (Cabling::Wireless, _) => Some("Wi-Fi cameras (no wiring needed)"),
        (Cabling::Wired, None) => None,
    }
}

/// Answers specific to one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackOptions {
    Security {
        budget: Option<BudgetFocus>,
        cabling: Option<Cabling>,
    },
    Networking {
        coverage: Option<CoverageNeed>,
    },
    Solar {
        backup: Option<BackupGoal>,
    },
    Digital {
        business: Option<BusinessType>,
        goal: Option<MainGoal>,
    },
}

impl TrackOptions {
    /// Unanswered options for a track.
    pub fn empty(track: Track) -> Self {
        match track {
            Track::Security => TrackOptions::Security {
                budget: None,
                cabling: None,
            },
            Track::Networking => TrackOptions::Networking { coverage: None },
            Track::Solar => TrackOptions::Solar { backup: None },
            Track::Digital => TrackOptions::Digital {
                business: None,
                goal: None,
            },
        }
    }

    pub fn track(&self) -> Track {
        match self {
            TrackOptions::Security { .. } => Track::Security,
            TrackOptions::Networking { .. } => Track::Networking,
            TrackOptions::Solar { .. } => Track::Solar,
            TrackOptions::Digital { .. } => Track::Digital,
        }
    }
}

/// A package inquiry as assembled in the Blueprint panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInquiry {
    pub package: Option<&'static Package>,
    pub space: Option<SpaceType>,
    pub size: Option<Size>,
    pub location: Option<String>,
    pub options: TrackOptions,
}

impl PackageInquiry {
    pub fn new(track: Track) -> Self {
        Self {
            package: None,
            space: None,
            size: None,
            location: None,
            options: TrackOptions::empty(track),
        }
    }

    pub fn track(&self) -> Track {
        self.options.track()
    }

    /// Switch track, clearing the package and track-specific answers.
    pub fn with_track(self, track: Track) -> Self {
        if track == self.track() {
            return self;
        }
        Self {
            package: None,
            options: TrackOptions::empty(track),
            ..self
        }
    }

    pub fn with_package(self, id: &str) -> Result<Self, BlueprintError> {
        let package = find_package(self.track(), id)?;
        Ok(Self {
            package: Some(package),
            ..self
        })
    }

    /// Replace the track-specific answers. They must belong to the same track.
    pub fn with_options(self, options: TrackOptions) -> Result<Self, BlueprintError> {
        if options.track() != self.track() {
            return Err(BlueprintError::invalid(
                "options",
                format!(
                    "{} options do not apply to the {} track",
                    options.track().key(),
                    self.track().key()
                ),
            ));
        }
        Ok(Self { options, ..self })
    }

    /// Whether the inquiry has enough to be sent.
    ///
    /// Digital needs business type and goal; the physical tracks need space
    /// and size. All tracks need a package.
    pub fn is_complete(&self) -> bool {
        if self.package.is_none() {
            return false;
        }
        match self.options {
            TrackOptions::Digital { business, goal } => business.is_some() && goal.is_some(),
            _ => self.space.is_some() && self.size.is_some(),
        }
    }

    pub fn system_hint(&self) -> Option<&'static str> {
        match self.options {
            TrackOptions::Security { budget, cabling } if self.package.is_some() => {
                security_system_hint(budget, cabling)
            }
            _ => None,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "{} System Inquiry - {}",
            self.track().key().to_uppercase(),
            self.package.map(|p| p.name).unwrap_or(NOT_SPECIFIED)
        )
    }

    /// The inquiry text, or `None` when no package is picked.
    pub fn message(&self) -> Option<String> {
        let package = self.package?;
        let mut message = format!(
            "*{} SYSTEM INQUIRY*\n\n*Package:* {}\n",
            self.track().key().to_uppercase(),
            package.name
        );

        if self.track() != Track::Digital {
            let space = self.space.map(|s| s.to_string());
            let size = self.size.map(|s| s.to_string());
            message.push_str(&format!(
                "*Space:* {} - {}\n",
                space.as_deref().unwrap_or(NOT_SPECIFIED),
                size.as_deref().unwrap_or(NOT_SPECIFIED)
            ));
        }

        if let Some(location) = self.location.as_deref().filter(|l| !l.trim().is_empty()) {
            message.push_str(&format!("*Location:* {}\n", location.trim()));
        }

        message.push_str("\n*What's Included:*\n");
        for item in package.includes {
            message.push_str(&format!("✓ {item}\n"));
        }

        match self.options {
            TrackOptions::Security { budget, cabling } => {
                if let Some(budget) = budget {
                    message.push_str(&format!("\n*Budget Focus:* {budget}\n"));
                }
                if let Some(cabling) = cabling {
                    message.push_str(&format!("*Cabling:* {cabling}\n"));
                }
                if let Some(hint) = self.system_hint() {
                    message.push_str(&format!("*Recommended:* {hint}\n"));
                }
            }
            TrackOptions::Solar {
                backup: Some(backup),
            } => message.push_str(&format!("\n*Backup Need:* {backup}\n")),
            TrackOptions::Networking {
                coverage: Some(coverage),
            } => message.push_str(&format!("\n*Coverage Need:* {coverage}\n")),
            TrackOptions::Digital { business, goal } => {
                if let Some(business) = business {
                    message.push_str(&format!("\n*Business Type:* {business}\n"));
                }
                if let Some(goal) = goal {
                    message.push_str(&format!("*Main Goal:* {goal}\n"));
                }
            }
            _ => {}
        }

        message.push_str(&format!("\n{INQUIRY_CLOSING}"));
        Some(message)
    }

    pub fn outbound(&self) -> Option<OutboundMessage> {
        self.message()
            .map(|body| OutboundMessage::new(self.subject(), body).with_crlf_email())
    }
}
