use btools_core::{FilterCriteria, SortDirection, SortKey};
use clap::Args;

/// Filter and sort flags shared by `search` and `saved save`.
#[derive(Debug, Clone, Default, Args)]
pub struct CriteriaArgs {
    /// Exact platform name (e.g. `YouTube`)
    #[arg(long)]
    pub platform: Option<String>,
    /// Category substring, case-insensitive
    #[arg(long)]
    pub category: Option<String>,
    /// Free-text search over name, category, platform and tags
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    /// Minimum followers, in thousands
    #[arg(long)]
    pub followers_min: Option<f64>,
    /// Maximum followers, in thousands
    #[arg(long)]
    pub followers_max: Option<f64>,
    #[arg(long)]
    pub er_min: Option<f64>,
    #[arg(long)]
    pub er_max: Option<f64>,
    #[arg(long)]
    pub views_min: Option<f64>,
    /// Minimum integration price in USD
    #[arg(long)]
    pub price_min: Option<f64>,
    /// Maximum integration price in USD
    #[arg(long)]
    pub price_max: Option<f64>,
    /// Dominant audience country code
    #[arg(long)]
    pub geo: Option<String>,
    #[arg(long)]
    pub geo_share: Option<f64>,
    /// Dominant audience gender (`male` / `female`)
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub gender_share: Option<f64>,
    /// Dominant audience age bucket (e.g. `18-24`)
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub age_share: Option<f64>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Only bloggers with a contact email
    #[arg(long)]
    pub has_email: bool,
    /// Lookalike substring
    #[arg(long)]
    pub similar_to: Option<String>,
    /// Keep only the top 25% by engagement rate
    #[arg(long)]
    pub top_er: bool,
    /// Sort key: followers, er, views, price, aqs, `last_post`
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
    /// Posted within the last N days
    #[arg(long)]
    pub last_post_days: Option<u32>,
    /// Comma-separated content formats; any one must match
    #[arg(long, value_delimiter = ',')]
    pub content_types: Vec<String>,
    /// Bio substring
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub verified_only: bool,
    #[arg(long)]
    pub has_phone: bool,
    #[arg(long)]
    pub posts_min: Option<f64>,
    /// Minimum 30-day follower growth, percent
    #[arg(long)]
    pub growth_min: Option<f64>,
    /// Minimum Audience Quality Score
    #[arg(long)]
    pub aqs_min: Option<f64>,
}

impl CriteriaArgs {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            platform: self.platform,
            category: self.category,
            query: self.query,
            followers_min_k: self.followers_min,
            followers_max_k: self.followers_max,
            er_min: self.er_min,
            er_max: self.er_max,
            views_min: self.views_min,
            price_min: self.price_min,
            price_max: self.price_max,
            audience_geo: self.geo,
            audience_geo_share: self.geo_share,
            audience_gender: self.gender,
            audience_gender_share: self.gender_share,
            audience_age_bucket: self.age,
            audience_age_share: self.age_share,
            language: self.language,
            country: self.country,
            has_email: self.has_email,
            similar_to: self.similar_to,
            ai_query: None,
            top_er: self.top_er,
            sort_by: self.sort,
            sort_dir: if self.asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            },
            last_post_days: self.last_post_days,
            content_types: self.content_types,
            bio_query: self.bio,
            verified_only: self.verified_only,
            has_phone: self.has_phone,
            posts_min: self.posts_min,
            growth30_min: self.growth_min,
            aqs_min: self.aqs_min,
        }
        .normalized()
    }
}
