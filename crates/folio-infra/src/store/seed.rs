//! Sample posts loaded into a fresh in-memory store.

use chrono::{DateTime, NaiveDate, Utc};

use folio_core::domain::{BlogPost, PostMetadata};

const SEED_AUTHOR: &str = "Alex Nkusi Shyaka";

struct Sample {
    id: &'static str,
    title: &'static str,
    slug: &'static str,
    content: &'static str,
    excerpt: &'static str,
    image: &'static str,
    tags: &'static [&'static str],
    date: (i32, u32, u32),
    read_time: u32,
    views: u64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "1",
        title: "Building Market-Ready Tech Skills for African Graduates",
        slug: "building-market-ready-tech-skills-african-graduates",
        content: include_str!("../../seed/building-market-ready-tech-skills-african-graduates.md"),
        excerpt: "How CodeImpact delivers market-ready tech skills through cohort-based training programs, aiming to bridge the skills gap for African graduates in the tech space.",
        image: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        tags: &["EdTech", "African Tech", "Community Building", "Skills Development"],
        date: (2024, 1, 15),
        read_time: 5,
        views: 850,
    },
    Sample {
        id: "2",
        title: "Our Learning Journey: Building Future Tech Leaders",
        slug: "our-learning-journey-building-future-tech-leaders",
        content: include_str!("../../seed/our-learning-journey-building-future-tech-leaders.md"),
        excerpt: "An inside look at CodeImpact's structured learning journey, from visual programming to JavaScript mastery, designed to build wholesome developers for the global tech space.",
        image: "https://images.unsplash.com/photo-1522071820081-009f0129c71c?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        tags: &["Education", "Curriculum", "Youth Development", "Programming"],
        date: (2021, 9, 11),
        read_time: 7,
        views: 1200,
    },
    Sample {
        id: "3",
        title: "The Attention Economy and How It's Affecting Our Teens",
        slug: "attention-economy-affecting-teens-part-one",
        content: include_str!("../../seed/attention-economy-affecting-teens-part-one.md"),
        excerpt: "Exploring how the attention economy impacts our teenagers and practical strategies parents can use to guide their children's technology use responsibly.",
        image: "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        tags: &["Digital Parenting", "Attention Economy", "Youth", "Technology"],
        date: (2021, 2, 20),
        read_time: 6,
        views: 950,
    },
    Sample {
        id: "4",
        title: "Building a Technology Community That Harnesses Global Practitioners",
        slug: "building-technology-community-uganda-global-practitioners",
        content: include_str!("../../seed/building-technology-community-uganda-global-practitioners.md"),
        excerpt: "CodeImpact's vision for building a million-strong technology community in Africa, focusing on coding as a literacy skill to create global tech leaders.",
        image: "https://images.unsplash.com/photo-1517180102446-f3ece451e9d8?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        tags: &["Community Building", "African Tech", "Vision", "Technology Education"],
        date: (2020, 12, 2),
        read_time: 8,
        views: 1100,
    },
];

/// The four published sample posts, ids `"1"` to `"4"`.
pub fn sample_posts() -> Vec<BlogPost> {
    SAMPLES.iter().map(Sample::to_post).collect()
}

impl Sample {
    fn to_post(&self) -> BlogPost {
        let (year, month, day) = self.date;
        let stamp = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
            .unwrap_or_default();

        BlogPost {
            id: self.id.to_string(),
            title: self.title.to_string(),
            slug: self.slug.to_string(),
            content: self.content.to_string(),
            excerpt: Some(self.excerpt.to_string()),
            featured_image: Some(self.image.to_string()),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            published: true,
            metadata: PostMetadata {
                read_time: self.read_time,
                views: self.views,
                author: SEED_AUTHOR.to_string(),
            },
            created_at: stamp,
            updated_at: stamp,
        }
    }
}
