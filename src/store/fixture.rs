//! Static sample content served when no other store is configured.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

use super::models::{Article, ArticleStatus, Banner, Category, RelatedBook};
use super::Snapshot;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn category(id: i64, name: &str, slug: &str, description: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
    }
}

fn book(
    id: i64,
    title: &str,
    author: &str,
    description: &str,
    price: &str,
    purchase_link: &str,
) -> RelatedBook {
    RelatedBook {
        id,
        title: title.to_string(),
        author: author.to_string(),
        description: Some(description.to_string()),
        price: Some(price.to_string()),
        purchase_link: purchase_link.to_string(),
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category(1, "Fiction", "fiction", "Fictional works"),
        category(2, "History", "history", "History and heritage"),
        category(3, "Science", "science", "Science writing"),
        category(4, "Self-Help", "self-help", "Personal growth"),
        category(5, "Technology", "technology", "Technology articles"),
    ]
}

pub fn articles() -> Vec<Article> {
    vec![
        Article {
            id: 1,
            title: "Building Your Personal Library: A Complete Guide".to_string(),
            slug: "building-personal-library-complete-guide".to_string(),
            content: "<h2>Introduction</h2><p>Building a personal library is more than just collecting books. \
                      It is about creating a curated space that reflects your interests, values, and intellectual journey. \
                      Whether you are starting from scratch or reorganizing an existing collection, this guide will help you \
                      create a library that truly serves your needs.</p><h3>Why Build a Personal Library?</h3>\
                      <p>In our digital age, you might wonder why physical books still matter. Personal libraries offer several unique benefits...</p>"
                .to_string(),
            excerpt: "Essential tips for curating a collection that reflects your personality and interests".to_string(),
            featured_image: Some("https://images.unsplash.com/photo-1481627834876-b7833e8f5570?auto=format&fit=crop&w=800&q=80".to_string()),
            category_id: 1,
            tags: tags(&["library", "books", "reading", "collection", "personal development"]),
            meta_title: Some("Building Your Personal Library: A Complete Guide".to_string()),
            meta_description: Some("Essential tips for curating a collection that reflects your personality".to_string()),
            is_featured: true,
            status: ArticleStatus::Published,
            view_count: 125,
            created_at: at(2024, 1, 15, 10, 30),
            updated_at: at(2024, 1, 15, 10, 30),
        },
        Article {
            id: 2,
            title: "The Evolution of Fantasy Literature".to_string(),
            slug: "evolution-fantasy-literature".to_string(),
            content: "<h2>From Tolkien to Modern Fantasy</h2><p>Fantasy literature has undergone tremendous evolution since \
                      the publication of The Lord of the Rings. What began as a niche genre has transformed into one of the most \
                      popular and diverse categories in modern literature.</p><h3>The Foundation Era</h3>\
                      <p>Tolkien's Middle-earth novels established many of the conventions we associate with fantasy today...</p>"
                .to_string(),
            excerpt: "Exploring how fantasy literature has transformed over the decades".to_string(),
            featured_image: Some("https://images.unsplash.com/photo-1524995997946-a1c2e315a42f?auto=format&fit=crop&w=800&q=80".to_string()),
            category_id: 1,
            tags: tags(&["fantasy", "literature", "evolution", "tolkien", "world-building"]),
            meta_title: Some("The Evolution of Fantasy Literature".to_string()),
            meta_description: Some("Exploring how fantasy literature has transformed over decades".to_string()),
            is_featured: false,
            status: ArticleStatus::Published,
            view_count: 89,
            created_at: at(2024, 1, 10, 14, 20),
            updated_at: at(2024, 1, 10, 14, 20),
        },
        Article {
            id: 3,
            title: "Ancient Libraries: Guardians of Knowledge".to_string(),
            slug: "ancient-libraries-guardians-knowledge".to_string(),
            content: "<h2>The Library of Alexandria</h2><p>Perhaps the most famous ancient library, Alexandria represented \
                      the pinnacle of scholarly achievement in the ancient world. Founded in the 3rd century BCE, it served as \
                      a beacon of learning and intellectual pursuit.</p><h3>Architecture and Organization</h3>\
                      <p>The Great Library was part of a larger scholarly institution known as the Mouseion...</p>"
                .to_string(),
            excerpt: "Discover the fascinating history of ancient libraries and their role".to_string(),
            featured_image: Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=800&q=80".to_string()),
            category_id: 2,
            tags: tags(&["history", "libraries", "ancient", "knowledge", "preservation"]),
            meta_title: Some("Ancient Libraries: Guardians of Knowledge".to_string()),
            meta_description: Some("Discover the fascinating history of ancient libraries".to_string()),
            is_featured: true,
            status: ArticleStatus::Published,
            view_count: 156,
            created_at: at(2024, 1, 5, 9, 15),
            updated_at: at(2024, 1, 5, 9, 15),
        },
    ]
}

pub fn related_books() -> HashMap<i64, Vec<RelatedBook>> {
    HashMap::from([
        (
            1,
            vec![
                book(1, "The Library Book", "Susan Orlean",
                    "A fascinating exploration of libraries and their cultural significance", "$14.99",
                    "https://www.amazon.com/Library-Book-Susan-Orlean/dp/1476740186"),
                book(2, "The Name of the Rose", "Umberto Eco",
                    "A mystery set in a medieval monastery library", "$15.95",
                    "https://www.amazon.com/Name-Rose-Umberto-Eco/dp/0544176561"),
            ],
        ),
        (
            2,
            vec![
                book(3, "The Lord of the Rings", "J.R.R. Tolkien",
                    "The epic fantasy that defined the genre", "$18.99",
                    "https://www.amazon.com/Lord-Rings-J-R-R-Tolkien/dp/0544003411"),
                book(4, "The Name of the Wind", "Patrick Rothfuss",
                    "Modern fantasy at its finest", "$16.99",
                    "https://www.amazon.com/Name-Wind-Patrick-Rothfuss/dp/0756404746"),
            ],
        ),
        (
            3,
            vec![book(5, "The Library of Alexandria", "Roy MacLeod",
                "Comprehensive history of the ancient world's greatest library", "$29.99",
                "https://www.amazon.com/Library-Alexandria-Roy-MacLeod/dp/1860646549")],
        ),
    ])
}

pub fn banners() -> Vec<Banner> {
    vec![
        Banner {
            id: 1,
            title: "Building Your Personal Library".to_string(),
            image: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?auto=format&fit=crop&w=1200&q=80".to_string(),
            link: "/blog/building-personal-library-complete-guide".to_string(),
        },
        Banner {
            id: 2,
            title: "Ancient Libraries".to_string(),
            image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=1200&q=80".to_string(),
            link: "/blog/ancient-libraries-guardians-knowledge".to_string(),
        },
    ]
}

/// Full sample snapshot
pub fn snapshot() -> Snapshot {
    Snapshot {
        articles: articles(),
        categories: categories(),
        related_books: related_books(),
        banners: banners(),
    }
}
