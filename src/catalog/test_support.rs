//! Small, fully valid brand/engine fixtures for unit tests.

use serde_json::{json, Value};

use crate::catalog::types::{BrandRecord, EngineRecord};

pub(crate) const PAGE_URL: &str = "https://www.example-engines.com/polestar/b308";

pub(crate) fn sample_engine_json() -> Value {
    json!({
        "metadata": {
            "title": "Polestar B308 Engine: Specs, Problems & Compatibility",
            "description": "Specifications, known problems and compatible models for the B308 three-cylinder engine."
        },
        "hero": {
            "years": "2015–2020",
            "paragraphs": [
                "The B308 is a 1.5-litre turbocharged three-cylinder from the VEA family."
            ],
            "disclaimer": {
                "title": "Verification required",
                "text": "Confirm the engine code on the block before ordering parts."
            }
        },
        "technicalSpecifications": {
            "description": "Core figures for the B308 as fitted to Polestar-optimised models.",
            "engineSpecs": [
                { "parameter": "Displacement", "value": "1,477 cc", "source": "Volvo EPC" },
                { "parameter": "Configuration", "value": "Inline-3, DOHC 12-valve", "source": "Volvo TSB 2016-043" }
            ],
            "practicalImplications": {
                "verificationNotes": {
                    "oil": "Use oil meeting VCC RBS0-2AE 0W-20."
                },
                "citations": ["Volvo Workshop Manual, section 21"]
            }
        },
        "compatibleModels": {
            "description": "Fitted to <strong>front-wheel-drive</strong> compact models.",
            "compatibleModels": [
                {
                    "Make": "Volvo",
                    "Models": "V40, XC40",
                    "Years": "2015–2020",
                    "Variants": "T3",
                    "OEM Source": "Volvo EPC"
                }
            ],
            "guidance": "Check the VIN plate before ordering.",
            "extraNotes": [
                {
                    "key": "identification",
                    "title": "Engine code location",
                    "description": "Stamped on the block.",
                    "locations": ["Front of block, below the thermostat housing"]
                }
            ]
        },
        "bannerImage": "/images/polestar/b308-banner.webp",
        "commonReliabilityIssues": {
            "subheading": "Issues reported by owners and workshops.",
            "issues": [
                {
                    "title": "Timing belt wear",
                    "symptoms": "Rattle at cold start.",
                    "cause": "Oil-wetted belt degradation.",
                    "fix": "Replace belt and tensioner at 150,000 km."
                }
            ],
            "infoBlock": {
                "title": "Maintenance tip",
                "description": "Shorter oil intervals extend belt life.",
                "gradient": "from-slate-800 to-slate-900"
            }
        },
        "faqs": [
            {
                "question": "Is the B308 reliable?",
                "answer": "Yes, when the oil and belt intervals are respected."
            },
            {
                "question": "Which oil does the B308 use?",
                "answer": "0W-20 meeting VCC RBS0-2AE."
            }
        ],
        "schema": {
            "@context": "https://schema.org",
            "@graph": [
                {
                    "@type": "WebSite",
                    "@id": "https://www.example-engines.com/#website",
                    "url": "https://www.example-engines.com/",
                    "name": "Example Engines"
                },
                {
                    "@type": "WebPage",
                    "@id": "https://www.example-engines.com/polestar/b308#webpage",
                    "url": PAGE_URL,
                    "name": "Polestar B308 Engine",
                    "isPartOf": { "@id": "https://www.example-engines.com/#website" },
                    "breadcrumb": {
                        "@type": "BreadcrumbList",
                        "itemListElement": [
                            { "@type": "ListItem", "position": 1, "name": "Home", "item": "https://www.example-engines.com/" },
                            { "@type": "ListItem", "position": 2, "name": "Polestar", "item": "https://www.example-engines.com/polestar" },
                            { "@type": "ListItem", "position": 3, "name": "B308", "item": PAGE_URL }
                        ]
                    }
                },
                {
                    "@type": "Article",
                    "@id": "https://www.example-engines.com/polestar/b308#article",
                    "headline": "Polestar B308 Engine",
                    "isPartOf": { "@id": "https://www.example-engines.com/polestar/b308#webpage" },
                    "datePublished": "2024-03-01",
                    "dateModified": "2024-06-15T09:30:00Z"
                },
                {
                    "@type": "VehicleEngine",
                    "@id": "https://www.example-engines.com/polestar/b308#engine",
                    "name": "B308",
                    "knownVehicleCompatibility": [
                        { "@type": "Vehicle", "name": "Volvo V40 T3" }
                    ]
                },
                {
                    "@type": "FAQPage",
                    "@id": "https://www.example-engines.com/polestar/b308#faq",
                    "mainEntity": [
                        {
                            "@type": "Question",
                            "name": "Is the B308 reliable?",
                            "acceptedAnswer": { "@type": "Answer", "text": "Yes, when the oil and belt intervals are respected." }
                        },
                        {
                            "@type": "Question",
                            "name": "Which oil does the B308 use?",
                            "acceptedAnswer": { "@type": "Answer", "text": "0W-20 meeting VCC RBS0-2AE." }
                        }
                    ]
                }
            ]
        }
    })
}

pub(crate) fn sample_engine() -> EngineRecord {
    serde_json::from_value(sample_engine_json()).unwrap()
}

pub(crate) fn sample_brand_json() -> Value {
    json!({
        "heroImage": { "src": "/images/polestar/hero.webp", "alt": "Polestar engine bay" },
        "researchResources": {
            "serviceManual": "https://www.volvocars.com/manuals",
            "serviceBulletinIndex": "https://www.nhtsa.gov/recalls"
        },
        "engines": {
            "b308": sample_engine_json()
        }
    })
}

pub(crate) fn sample_brand() -> BrandRecord {
    serde_json::from_value(sample_brand_json()).unwrap()
}
