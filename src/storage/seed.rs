use anyhow::Context;

use super::memory::Tables;
use super::types::*;
use crate::users::password::hash_blocking;

const DEMO_PASSWORD: &str = "password123";

struct DemoUser {
    username: &'static str,
    name: &'static str,
    email: &'static str,
    bio: &'static str,
    skills: &'static [&'static str],
    avatar: &'static str,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        username: "alexchen",
        name: "Alexandra Chen",
        email: "alex@example.com",
        bio: "Entrepreneur and health enthusiast",
        skills: &["Product Design", "Marketing", "Health Tech"],
        avatar: "https://randomuser.me/api/portraits/women/23.jpg",
    },
    DemoUser {
        username: "mjohnson",
        name: "Marcus Johnson",
        email: "marcus@example.com",
        bio: "Full-stack developer",
        skills: &["JavaScript", "React", "Node.js"],
        avatar: "https://randomuser.me/api/portraits/men/54.jpg",
    },
    DemoUser {
        username: "ppatel",
        name: "Priya Patel",
        email: "priya@example.com",
        bio: "Environmental engineer",
        skills: &["Sustainability", "Business Development"],
        avatar: "https://randomuser.me/api/portraits/women/86.jpg",
    },
];

struct DemoIdea {
    title: &'static str,
    description: &'static str,
    user_id: Id,
    image: &'static str,
    tags: &'static [&'static str],
}

const IDEAS: &[DemoIdea] = &[
    DemoIdea {
        title: "AI Recipe Generator",
        description: "An app that generates personalized recipes based on ingredients you already have at home using AI.",
        user_id: 1,
        image: "https://images.unsplash.com/photo-1581291518633-83b4ebd1d83e?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80",
        tags: &["AI", "Food", "Mobile"],
    },
    DemoIdea {
        title: "Remote Team Builder",
        description: "Platform that helps remote teams build camaraderie through virtual team-building activities and games.",
        user_id: 2,
        image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80",
        tags: &["Remote Work", "Team Building"],
    },
    DemoIdea {
        title: "Skill Swap Marketplace",
        description: "Peer-to-peer platform where users can exchange skills and knowledge without money changing hands.",
        user_id: 3,
        image: "https://images.unsplash.com/photo-1512314889357-e157c22f938d?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80",
        tags: &["Education", "Marketplace", "Community"],
    },
    DemoIdea {
        title: "Carbon Footprint Tracker",
        description: "App that tracks personal carbon footprint and suggests actionable ways to reduce environmental impact.",
        user_id: 3,
        image: "https://images.unsplash.com/photo-1593642632823-8f785ba67e45?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80",
        tags: &["Environment", "Sustainability", "IoT"],
    },
];

// (idea_id, user_id)
const VOTES: &[(Id, Id)] = &[(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (4, 1), (4, 2)];

const COMMENTS: &[(Id, Id, &str)] = &[
    (1, 2, "This is a great idea! I'd love to collaborate."),
    (1, 3, "Have you thought about integrating with grocery delivery services?"),
    (2, 1, "This is exactly what my team needs right now."),
    (3, 2, "This could really transform how people learn new skills."),
];

const COLLABORATIONS: &[(Id, Id, CollaborationStatus, &str)] = &[
    (1, 2, CollaborationStatus::Pending, "I'd love to help with the backend development."),
    (2, 3, CollaborationStatus::Accepted, "I can help with the UI design."),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fills empty tables with the landing-page demo set.
pub(super) fn load(tables: &mut Tables) -> anyhow::Result<()> {
    let password_hash =
        hash_blocking(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!("hash demo password: {e}"))?;
    for u in USERS {
        tables.insert_user(NewUser {
            username: u.username.into(),
            password_hash: password_hash.clone(),
            name: u.name.into(),
            email: u.email.into(),
            avatar: Some(u.avatar.into()),
            bio: Some(u.bio.into()),
            skills: Some(strings(u.skills)),
        })?;
    }

    for i in IDEAS {
        tables.insert_idea(NewIdea {
            title: i.title.into(),
            description: i.description.into(),
            user_id: i.user_id,
            image: Some(i.image.into()),
            tags: strings(i.tags),
        })?;
    }

    for &(idea_id, user_id) in VOTES {
        tables.insert_vote(NewVote { idea_id, user_id })?;
    }

    for &(idea_id, user_id, content) in COMMENTS {
        tables.insert_comment(NewComment {
            idea_id,
            user_id,
            content: content.into(),
        })?;
    }

    for &(idea_id, user_id, status, message) in COLLABORATIONS {
        tables
            .insert_collaboration(NewCollaboration {
                idea_id,
                user_id,
                status,
                message: message.into(),
            })
            .context("seed collaborations")?;
    }

    tracing::info!(
        users = USERS.len(),
        ideas = IDEAS.len(),
        votes = VOTES.len(),
        "demo data loaded"
    );
    Ok(())
}
