use crate::models::{CompanyProfile, SizeCategory};

const INDUSTRY: &str = "Technology Services";

const ENTERPRISES: &[&str] = &[
    "amazon", "google", "microsoft", "apple", "meta", "facebook", "infosys", "tcs",
    "wipro", "hcl", "cognizant", "accenture", "ibm", "oracle", "sap", "deloitte",
    "capgemini", "tech mahindra", "flipkart", "walmart", "uber", "netflix", "adobe",
    "salesforce", "paypal", "stripe", "intel", "cisco", "qualcomm",
];

const MID_SIZE: &[&str] = &[
    "razorpay", "cred", "swiggy", "zomato", "phonepe", "paytm", "ola", "byju",
    "unacademy", "meesho", "groww", "slice", "jupiter", "freshworks", "zoho",
];

/// Exact-name size lookup. Anything unknown is treated as a startup.
pub fn size_category(company: &str) -> SizeCategory {
    let key = company.trim().to_lowercase();
    if ENTERPRISES.contains(&key.as_str()) {
        SizeCategory::Enterprise
    } else if MID_SIZE.contains(&key.as_str()) {
        SizeCategory::MidSize
    } else {
        SizeCategory::Startup
    }
}

pub fn hiring_focus(size: SizeCategory) -> &'static str {
    match size {
        SizeCategory::Enterprise => {
            "Structured DSA rounds, core CS fundamentals, and system design. Strong emphasis on problem-solving methodology."
        }
        SizeCategory::MidSize => {
            "Balanced approach — practical coding, system thinking, and product understanding. Values ownership mindset."
        }
        SizeCategory::Startup => {
            "Practical problem solving, stack depth, and ability to ship. Culture fit matters significantly."
        }
    }
}

/// `None` for a blank name; otherwise a heuristic profile.
pub fn infer_company(company: &str) -> Option<CompanyProfile> {
    let name = company.trim();
    if name.is_empty() {
        return None;
    }
    let size = size_category(name);
    Some(CompanyProfile {
        name: name.to_string(),
        industry: INDUSTRY.to_string(),
        size_category: size,
        hiring_focus: hiring_focus(size).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_company_has_no_profile() {
        assert!(infer_company("").is_none());
        assert!(infer_company("   ").is_none());
    }

    #[test]
    fn test_known_enterprise() {
        let profile = infer_company("Google").unwrap();
        assert_eq!(profile.size_category, SizeCategory::Enterprise);
        assert_eq!(profile.industry, "Technology Services");
        assert!(profile.hiring_focus.starts_with("Structured DSA"));
    }

    #[test]
    fn test_lookup_is_trimmed_and_case_insensitive() {
        assert_eq!(size_category("  Tech Mahindra "), SizeCategory::Enterprise);
        assert_eq!(size_category("ZOMATO"), SizeCategory::MidSize);
    }

    #[test]
    fn test_unknown_defaults_to_startup() {
        let profile = infer_company("acme").unwrap();
        assert_eq!(profile.size_category, SizeCategory::Startup);
        assert_eq!(profile.name, "acme");
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert_eq!(size_category("Google India"), SizeCategory::Startup);
        assert_eq!(size_category("amazonn"), SizeCategory::Startup);
    }

    #[test]
    fn test_mid_size_focus_text() {
        let profile = infer_company("Swiggy").unwrap();
        assert_eq!(profile.size_category, SizeCategory::MidSize);
        assert_eq!(
            profile.hiring_focus,
            "Balanced approach — practical coding, system thinking, and product understanding. Values ownership mindset."
        );
    }

    #[test]
    fn test_industry_is_fixed() {
        for name in ["Google", "Swiggy", "acme"] {
            assert_eq!(infer_company(name).unwrap().industry, INDUSTRY);
        }
    }
}
