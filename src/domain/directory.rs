//! Static grants directory and past-application history.

use std::fmt;

pub const ALL_CATEGORY: &str = "All";
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORY,
    "Technology",
    "Environment",
    "Healthcare",
    "Community",
    "Arts",
    "Diversity",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGrant {
    pub id: u32,
    pub title: &'static str,
    pub organization: &'static str,
    pub amount: &'static str,
    pub deadline: &'static str,
    pub location: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub difficulty: Difficulty,
}

impl DirectoryGrant {
    fn matches_query(&self, needle: &str) -> bool {
        [self.title, self.organization, self.description]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle))
    }
}

pub fn directory_grants() -> Vec<DirectoryGrant> {
    vec![
        DirectoryGrant {
            id: 1,
            title: "Small Business Innovation Research (SBIR) Grant",
            organization: "National Science Foundation",
            amount: "$1,500,000",
            deadline: "March 15, 2024",
            location: "United States",
            category: "Technology",
            description: "Supporting innovative research and development in small businesses with potential for commercialization.",
            tags: &["R&D", "Innovation", "Technology"],
            difficulty: Difficulty::Medium,
        },
        DirectoryGrant {
            id: 2,
            title: "Renewable Energy Startup Fund",
            organization: "Department of Energy",
            amount: "$750,000",
            deadline: "April 30, 2024",
            location: "United States",
            category: "Environment",
            description: "Funding for startups developing innovative renewable energy solutions and clean technologies.",
            tags: &["Clean Energy", "Startups", "Environment"],
            difficulty: Difficulty::High,
        },
        DirectoryGrant {
            id: 3,
            title: "Women in Tech Leadership Grant",
            organization: "Tech Diversity Foundation",
            amount: "$50,000",
            deadline: "February 28, 2024",
            location: "Global",
            category: "Diversity",
            description: "Supporting women-led technology companies and promoting diversity in the tech industry.",
            tags: &["Diversity", "Women", "Technology"],
            difficulty: Difficulty::Low,
        },
        DirectoryGrant {
            id: 4,
            title: "Community Development Block Grant",
            organization: "HUD",
            amount: "$2,000,000",
            deadline: "May 15, 2024",
            location: "United States",
            category: "Community",
            description: "Funding for community development projects that benefit low and moderate-income families.",
            tags: &["Community", "Housing", "Development"],
            difficulty: Difficulty::Medium,
        },
        DirectoryGrant {
            id: 5,
            title: "Healthcare Innovation Grant",
            organization: "NIH",
            amount: "$500,000",
            deadline: "June 30, 2024",
            location: "United States",
            category: "Healthcare",
            description: "Supporting innovative healthcare solutions and medical technology development.",
            tags: &["Healthcare", "Innovation", "Medical"],
            difficulty: Difficulty::High,
        },
        DirectoryGrant {
            id: 6,
            title: "Arts and Culture Preservation Fund",
            organization: "National Endowment for the Arts",
            amount: "$25,000",
            deadline: "March 1, 2024",
            location: "United States",
            category: "Arts",
            description: "Preserving and promoting arts and cultural heritage in local communities.",
            tags: &["Arts", "Culture", "Community"],
            difficulty: Difficulty::Low,
        },
    ]
}

/// Case-insensitive search over title, organization and description,
/// narrowed to `category` unless it is "All" or empty.
pub fn filter_grants<'a>(
    grants: &'a [DirectoryGrant],
    query: &str,
    category: &str,
) -> Vec<&'a DirectoryGrant> {
    let needle = query.to_lowercase();
    grants
        .iter()
        .filter(|grant| grant.matches_query(&needle))
        .filter(|grant| category.is_empty() || category == ALL_CATEGORY || grant.category == category)
        .collect()
}

pub fn next_category(current: &str) -> &'static str {
    let idx = CATEGORIES
        .iter()
        .position(|category| *category == current)
        .map(|idx| (idx + 1) % CATEGORIES.len())
        .unwrap_or(0);
    CATEGORIES[idx]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under-review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastApplication {
    pub id: &'static str,
    pub grant_title: &'static str,
    pub amount: &'static str,
    pub status: ApplicationStatus,
    pub submitted_date: &'static str,
    pub business_name: &'static str,
}

pub fn past_applications() -> Vec<PastApplication> {
    vec![
        PastApplication {
            id: "1",
            grant_title: "Small Business Innovation Grant",
            amount: "$45,000",
            status: ApplicationStatus::UnderReview,
            submitted_date: "2024-01-15",
            business_name: "Tech Solutions Pty Ltd",
        },
        PastApplication {
            id: "2",
            grant_title: "Export Market Development Grant",
            amount: "$120,000",
            status: ApplicationStatus::Approved,
            submitted_date: "2023-12-08",
            business_name: "Global Exports Co",
        },
        PastApplication {
            id: "3",
            grant_title: "Sustainability Transition Grant",
            amount: "$85,000",
            status: ApplicationStatus::Submitted,
            submitted_date: "2024-02-03",
            business_name: "Green Manufacturing Ltd",
        },
        PastApplication {
            id: "4",
            grant_title: "Research & Development Grant",
            amount: "$200,000",
            status: ApplicationStatus::Rejected,
            submitted_date: "2023-11-22",
            business_name: "Innovation Labs Inc",
        },
    ]
}

/// Applications still waiting on a decision.
pub fn pending_count(applications: &[PastApplication]) -> usize {
    applications
        .iter()
        .filter(|app| {
            matches!(
                app.status,
                ApplicationStatus::Submitted | ApplicationStatus::UnderReview
            )
        })
        .count()
}

pub fn approved_count(applications: &[PastApplication]) -> usize {
    applications
        .iter()
        .filter(|app| app.status == ApplicationStatus::Approved)
        .count()
}
