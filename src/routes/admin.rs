/**
 * Admin Routes
 * Article create/update/delete behind an admin session
 */
use axum::{
    extract::{Form, FromRequest, Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::listing::enrich::{enrich, ArticleView};
use crate::routes::blogs::parse_article_id;
use crate::session::RequireAdmin;
use crate::slug::{is_valid_slug, slugify};
use crate::store::models::{Article, ArticleChanges, ArticleStatus, NewArticle, NewRelatedBook};
use crate::AppState;

const EXCERPT_CHARS: usize = 150;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Tags arrive either as a JSON array or as a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    fn into_tags(self) -> Vec<String> {
        let raw = match self {
            TagsInput::List(tags) => tags,
            TagsInput::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Numeric id sent as a number or a string (form posts send strings).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    /// Forms send unset ids as empty strings
    fn present(input: Option<IdInput>) -> Option<IdInput> {
        input.filter(|id| !matches!(id, IdInput::Text(s) if s.trim().is_empty()))
    }

    fn resolve(&self, field: &str) -> Result<i64, AppError> {
        match self {
            IdInput::Number(n) if *n > 0 => Ok(*n),
            IdInput::Number(n) => Err(AppError::invalid(format!(
                "{} must be a positive integer (got {})",
                field, n
            ))),
            IdInput::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::invalid(format!(
                        "{} must be a positive integer (got '{}')",
                        field, s
                    ))
                }),
        }
    }
}

/// Boolean flag sent as `true`, `1` or `"true"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl FlagInput {
    fn resolve(&self) -> Result<bool, AppError> {
        match self {
            FlagInput::Bool(b) => Ok(*b),
            FlagInput::Number(0) => Ok(false),
            FlagInput::Number(1) => Ok(true),
            FlagInput::Text(s) => match s.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                other => Err(AppError::invalid(format!(
                    "is_featured must be true, false, 1 or 0 (got '{}')",
                    other
                ))),
            },
            FlagInput::Number(n) => Err(AppError::invalid(format!(
                "is_featured must be true, false, 1 or 0 (got {})",
                n
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RelatedBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub purchase_link: Option<String>,
}

/// Request body for POST /api/admin/blogs
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<IdInput>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<TagsInput>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<FlagInput>,
    pub related_books: Option<Vec<RelatedBookInput>>,
}

/// Request body for PUT /api/admin/blogs; absent fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub id: Option<IdInput>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<IdInput>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<TagsInput>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<FlagInput>,
    pub related_books: Option<Vec<RelatedBookInput>>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBlogQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBlogResponse {
    pub success: bool,
    pub message: String,
    pub blog_id: i64,
    pub slug: String,
    pub blog: ArticleView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBlogResponse {
    pub success: bool,
    pub message: String,
    pub blog: ArticleView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteBlogResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Sanitize HTML content using ammonia
fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Plain-text excerpt from HTML content
fn generate_excerpt(html: &str) -> String {
    let text = TAG_REGEX.replace_all(html, " ");
    let text = WHITESPACE_RUN.replace_all(text.trim(), " ");
    if text.chars().count() <= EXCERPT_CHARS {
        return text.into_owned();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_status(raw: Option<String>) -> Result<Option<ArticleStatus>, AppError> {
    non_blank(raw)
        .map(|s| s.parse::<ArticleStatus>().map_err(AppError::invalid))
        .transpose()
}

fn checked_slug(slug: String) -> Result<String, AppError> {
    if is_valid_slug(&slug) {
        Ok(slug)
    } else {
        Err(AppError::invalid(
            "Slug must contain only lowercase letters, numbers, and hyphens",
        ))
    }
}

fn related_books(input: Vec<RelatedBookInput>) -> Result<Vec<NewRelatedBook>, AppError> {
    input
        .into_iter()
        .map(|book| {
            let title = non_blank(book.title)
                .ok_or_else(|| AppError::invalid("Related book title is required"))?;
            Ok(NewRelatedBook {
                title,
                author: non_blank(book.author).unwrap_or_default(),
                description: non_blank(book.description),
                price: non_blank(book.price),
                purchase_link: non_blank(book.purchase_link).unwrap_or_default(),
            })
        })
        .collect()
}

// ============================================================================
// Request Body
// ============================================================================

/// Admin write body. API clients send JSON; the admin panel sends
/// `multipart/form-data` with `related_books` as a JSON-encoded string.
pub struct AdminBody<T>(pub T);

enum BodyKind {
    Json,
    Multipart,
    UrlEncoded,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type.starts_with("multipart/form-data") {
        BodyKind::Multipart
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::UrlEncoded
    } else {
        BodyKind::Json
    }
}

/// Form fields are all text; `related_books` carries a JSON array.
fn insert_form_field(
    fields: &mut Map<String, Value>,
    name: String,
    text: String,
) -> Result<(), AppError> {
    let value = if name == "related_books" {
        if text.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str(&text).map_err(|e| {
            AppError::invalid(format!("related_books must be a JSON array: {}", e))
        })?
    } else {
        Value::String(text)
    };
    fields.insert(name, value);
    Ok(())
}

async fn multipart_fields(mut multipart: Multipart) -> Result<Value, AppError> {
    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        // Image uploads are not stored
        if field.file_name().is_some() {
            tracing::debug!(field = %name, "ignoring file part");
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| AppError::invalid(e.body_text()))?;
        insert_form_field(&mut fields, name, text)?;
    }
    Ok(Value::Object(fields))
}

impl<S, T> FromRequest<S> for AdminBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match body_kind(req.headers()) {
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::invalid(e.body_text()))?;
                multipart_fields(multipart).await?
            }
            BodyKind::UrlEncoded => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::invalid(e.body_text()))?;
                let mut fields = Map::new();
                for (name, text) in pairs {
                    insert_form_field(&mut fields, name, text)?;
                }
                Value::Object(fields)
            }
            BodyKind::Json => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::invalid(e.body_text()))?;
                value
            }
        };

        serde_json::from_value(value)
            .map(AdminBody)
            .map_err(|e| AppError::invalid(format!("Invalid request data: {}", e)))
    }
}

impl CreateBlogRequest {
    fn into_new_article(self) -> Result<NewArticle, AppError> {
        let (title, content, category_id) = match (
            non_blank(self.title),
            non_blank(self.content),
            IdInput::present(self.category_id),
        ) {
            (Some(title), Some(content), Some(category_id)) => (title, content, category_id),
            _ => {
                return Err(AppError::invalid(
                    "Title, content, and category are required",
                ))
            }
        };
        let category_id = category_id.resolve("category_id")?;

        let slug = match non_blank(self.slug) {
            Some(slug) => checked_slug(slug)?,
            None => slugify(&title)
                .ok_or_else(|| AppError::invalid("Cannot derive a slug from the title"))?,
        };

        let content = sanitize_html(&content);
        let excerpt = non_blank(self.excerpt).unwrap_or_else(|| generate_excerpt(&content));

        Ok(NewArticle {
            title,
            slug,
            excerpt,
            content,
            featured_image: non_blank(self.featured_image),
            category_id,
            tags: self.tags.map(TagsInput::into_tags).unwrap_or_default(),
            meta_title: non_blank(self.meta_title),
            meta_description: non_blank(self.meta_description),
            status: parse_status(self.status)?.unwrap_or_default(),
            is_featured: self.is_featured.map(|f| f.resolve()).transpose()?.unwrap_or(false),
            related_books: related_books(self.related_books.unwrap_or_default())?,
        })
    }
}

impl UpdateBlogRequest {
    fn into_changes(self) -> Result<(i64, ArticleChanges), AppError> {
        let id = IdInput::present(self.id)
            .ok_or_else(|| AppError::invalid("Blog ID required"))?
            .resolve("id")?;

        let content = non_blank(self.content).map(|c| sanitize_html(&c));
        // New content without an explicit excerpt replaces the stale one
        let excerpt = non_blank(self.excerpt)
            .or_else(|| content.as_deref().map(generate_excerpt));

        let changes = ArticleChanges {
            title: non_blank(self.title),
            slug: non_blank(self.slug).map(checked_slug).transpose()?,
            content,
            excerpt,
            featured_image: non_blank(self.featured_image),
            category_id: IdInput::present(self.category_id)
                .map(|c| c.resolve("category_id"))
                .transpose()?,
            tags: self.tags.map(TagsInput::into_tags),
            meta_title: non_blank(self.meta_title),
            meta_description: non_blank(self.meta_description),
            status: parse_status(self.status)?,
            is_featured: self.is_featured.map(|f| f.resolve()).transpose()?,
            related_books: self.related_books.map(related_books).transpose()?,
        };
        Ok((id, changes))
    }
}

fn view_of(state: &AppState, article: &Article) -> Result<ArticleView, AppError> {
    let snapshot = state.store.snapshot()?;
    Ok(enrich(article, &snapshot))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/admin/blogs
pub async fn create_blog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AdminBody(payload): AdminBody<CreateBlogRequest>,
) -> Result<(StatusCode, Json<CreateBlogResponse>), AppError> {
    let new_article = payload.into_new_article()?;
    let article = state.store.insert_article(new_article)?;
    tracing::info!(admin = %admin.username, article_id = article.id, "blog created");

    Ok((
        StatusCode::CREATED,
        Json(CreateBlogResponse {
            success: true,
            message: "Blog created successfully".to_string(),
            blog_id: article.id,
            slug: article.slug.clone(),
            blog: view_of(&state, &article)?,
        }),
    ))
}

/// PUT /api/admin/blogs
pub async fn update_blog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AdminBody(payload): AdminBody<UpdateBlogRequest>,
) -> Result<Json<UpdateBlogResponse>, AppError> {
    let (id, changes) = payload.into_changes()?;
    let article = state.store.update_article(id, changes)?;
    tracing::info!(admin = %admin.username, article_id = id, "blog updated");

    Ok(Json(UpdateBlogResponse {
        success: true,
        message: "Blog updated successfully".to_string(),
        blog: view_of(&state, &article)?,
    }))
}

fn delete_article(
    state: &AppState,
    admin: &str,
    id: i64,
) -> Result<Json<DeleteBlogResponse>, AppError> {
    state.store.delete_article(id)?;
    tracing::info!(admin = %admin, article_id = id, "blog deleted");

    Ok(Json(DeleteBlogResponse {
        success: true,
        message: "Blog deleted successfully".to_string(),
    }))
}

/// DELETE /api/admin/blogs?id=N
pub async fn delete_blog_by_query(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<DeleteBlogQuery>,
) -> Result<Json<DeleteBlogResponse>, AppError> {
    let raw = non_blank(query.id)
        .ok_or_else(|| AppError::invalid("Blog ID required for deletion"))?;
    let id = parse_article_id(&raw)?;
    delete_article(&state, &admin.username, id)
}

/// DELETE /api/admin/blogs/{id}
pub async fn delete_blog_by_path(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBlogResponse>, AppError> {
    let id = parse_article_id(&id)?;
    delete_article(&state, &admin.username, id)
}
