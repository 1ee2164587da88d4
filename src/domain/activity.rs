//! Static activity data behind the dashboard and the chats screen: saved
//! chat sessions, the sample transcript, the section checklist, the grant
//! being worked on, notifications and headline stats.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Submitted,
    Draft,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionStatus::InProgress => "In Progress",
            SessionStatus::Submitted => "Submitted",
            SessionStatus::Draft => "Draft",
        })
    }
}

/// A saved conversation about one grant application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: u32,
    pub title: &'static str,
    /// Percent complete, 0..=100
    pub progress: u16,
    pub status: SessionStatus,
    pub last_message: &'static str,
    pub last_activity: &'static str,
}

pub fn chat_sessions() -> Vec<ChatSession> {
    vec![
        ChatSession {
            id: 1,
            title: "Small Business Innovation Grant",
            progress: 75,
            status: SessionStatus::InProgress,
            last_message: "Let's review your business plan...",
            last_activity: "2 hours ago",
        },
        ChatSession {
            id: 2,
            title: "Renewable Energy Startup Fund",
            progress: 100,
            status: SessionStatus::Submitted,
            last_message: "Application submitted successfully!",
            last_activity: "1 day ago",
        },
        ChatSession {
            id: 3,
            title: "Women in Tech Grant",
            progress: 30,
            status: SessionStatus::Draft,
            last_message: "What's your company's mission?",
            last_activity: "3 days ago",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: String,
}

impl TranscriptMessage {
    fn new(speaker: Speaker, content: &str, timestamp: &str) -> Self {
        Self {
            speaker,
            content: content.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    pub fn from_user(content: &str) -> Self {
        Self::new(Speaker::User, content, "just now")
    }
}

pub fn sample_transcript() -> Vec<TranscriptMessage> {
    vec![
        TranscriptMessage::new(
            Speaker::Bot,
            "Hello! I'm your GrantBot assistant. I'm here to help you apply for the Small Business Innovation Research (SBIR) Grant. Let's start by telling me about your business.",
            "10:30 AM",
        ),
        TranscriptMessage::new(
            Speaker::User,
            "Hi! We're a tech startup developing AI-powered healthcare solutions.",
            "10:32 AM",
        ),
        TranscriptMessage::new(
            Speaker::Bot,
            "That sounds fascinating! AI in healthcare is definitely aligned with SBIR priorities. Can you tell me more about your specific solution? What problem does it solve?",
            "10:33 AM",
        ),
        TranscriptMessage::new(
            Speaker::User,
            "We're developing an AI system that can predict patient readmissions by analyzing medical records and social determinants of health.",
            "10:35 AM",
        ),
        TranscriptMessage::new(
            Speaker::Bot,
            "Excellent! That addresses a critical healthcare challenge. For the SBIR application, we'll need to demonstrate the innovation and commercial potential. Let me help you prepare the required documents. Have you completed any preliminary research or pilot studies?",
            "10:36 AM",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub section: &'static str,
    pub completed: bool,
    pub current: bool,
}

pub fn section_checklist() -> Vec<ChecklistItem> {
    const SECTIONS: [(&str, bool, bool); 8] = [
        ("Business Information", true, false),
        ("Project Description", true, false),
        ("Technical Approach", false, true),
        ("Market Analysis", false, false),
        ("Budget Breakdown", false, false),
        ("Team Qualifications", false, false),
        ("Commercialization Plan", false, false),
        ("Supporting Documents", false, false),
    ];
    SECTIONS
        .iter()
        .map(|&(section, completed, current)| ChecklistItem {
            section,
            completed,
            current,
        })
        .collect()
}

/// `(completed, total)`.
pub fn checklist_progress(items: &[ChecklistItem]) -> (usize, usize) {
    let done = items.iter().filter(|item| item.completed).count();
    (done, items.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantInfo {
    pub title: &'static str,
    pub organization: &'static str,
    pub amount: &'static str,
    pub deadline: &'static str,
    pub phase: &'static str,
    pub duration: &'static str,
}

pub fn active_grant_info() -> GrantInfo {
    GrantInfo {
        title: "Small Business Innovation Research (SBIR)",
        organization: "National Science Foundation",
        amount: "$1,500,000",
        deadline: "March 15, 2024",
        phase: "Phase II",
        duration: "24 months",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Deadline,
    Success,
    Update,
}

impl NotificationKind {
    pub fn marker(self) -> &'static str {
        match self {
            NotificationKind::Deadline => "!",
            NotificationKind::Success => "✓",
            NotificationKind::Update => "•",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
    pub time: &'static str,
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            kind: NotificationKind::Deadline,
            message: "Small Business Grant deadline in 5 days",
            time: "1 hour ago",
        },
        Notification {
            kind: NotificationKind::Success,
            message: "Your Renewable Energy application was submitted",
            time: "1 day ago",
        },
        Notification {
            kind: NotificationKind::Update,
            message: "New grants matching your profile available",
            time: "2 days ago",
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStat {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

pub fn dashboard_stats() -> Vec<DashboardStat> {
    vec![
        DashboardStat {
            title: "Applications Started",
            value: "12",
            change: "+2 this week",
        },
        DashboardStat {
            title: "Submitted",
            value: "5",
            change: "+1 this week",
        },
        DashboardStat {
            title: "Total Funding Applied",
            value: "$2.4M",
            change: "+$500K this month",
        },
        DashboardStat {
            title: "Success Rate",
            value: "68%",
            change: "+5% improvement",
        },
    ]
}
