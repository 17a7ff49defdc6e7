//! Drama listing query composition.
//!
//! Every optional filter is turned into one [`Condition`]. The page fetch and
//! the total count are both derived from that same condition, so the reported
//! total always describes the filtered set and never the page.

use crate::domain::{DramaSort, DramaStatus, Pagination};
use crate::entities::{drama_genres, dramas, genres, prelude::*};
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

/// How the `genre` filter names a genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreRef {
    Id(i32),
    Slug(String),
}

impl GenreRef {
    /// Numeric input is an id; anything else is treated as a slug.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(
            raw.parse::<i32>()
                .map_or_else(|_| Self::Slug(raw.to_lowercase()), Self::Id),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DramaFilter {
    /// Case-insensitive substring of the title.
    pub q: Option<String>,
    pub genre: Option<GenreRef>,
    pub status: Option<DramaStatus>,
}

impl DramaFilter {
    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col((Dramas, dramas::Column::Title))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        if let Some(genre) = &self.genre {
            condition = condition.add(dramas::Column::Id.in_subquery(genre_subquery(genre)));
        }

        if let Some(status) = self.status {
            condition = condition.add(dramas::Column::Status.eq(status.as_str()));
        }

        condition
    }
}

fn genre_subquery(genre: &GenreRef) -> SelectStatement {
    let mut select = Query::select();
    select
        .column((DramaGenres, drama_genres::Column::DramaId))
        .from(DramaGenres);

    match genre {
        GenreRef::Id(id) => {
            select.and_where(Expr::col((DramaGenres, drama_genres::Column::GenreId)).eq(*id));
        }
        GenreRef::Slug(slug) => {
            select
                .inner_join(
                    Genres,
                    Expr::col((Genres, genres::Column::Id))
                        .equals((DramaGenres, drama_genres::Column::GenreId)),
                )
                .and_where(Expr::col((Genres, genres::Column::Slug)).eq(slug.as_str()));
        }
    }

    select.to_owned()
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct DramaListQuery {
    pub filter: DramaFilter,
    pub sort: DramaSort,
    pub window: Pagination,
}

impl DramaListQuery {
    /// Rows matching the filter, unordered and unpaged. Used for the total.
    #[must_use]
    pub fn count_select(&self) -> Select<Dramas> {
        Dramas::find().filter(self.filter.condition())
    }

    /// The requested page, ordered by the sort key with an id tie-break so
    /// consecutive pages never overlap.
    #[must_use]
    pub fn page_select(&self) -> Select<Dramas> {
        let select = Dramas::find().filter(self.filter.condition());

        let select = match self.sort {
            DramaSort::Popular => select
                .order_by_desc(dramas::Column::ViewCount)
                .order_by_desc(dramas::Column::Id),
            DramaSort::Rating => select
                .order_by_desc(dramas::Column::Rating)
                .order_by_desc(dramas::Column::Id),
            DramaSort::Oldest => select
                .order_by_asc(dramas::Column::CreatedAt)
                .order_by_asc(dramas::Column::Id),
            DramaSort::Latest => select
                .order_by_desc(dramas::Column::CreatedAt)
                .order_by_desc(dramas::Column::Id),
        };

        select
            .limit(self.window.limit())
            .offset(self.window.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn where_clause(sql: &str) -> String {
        let (_, rest) = sql.split_once(" WHERE ").expect("statement has a WHERE clause");
        let end = [" ORDER BY ", " LIMIT "]
            .iter()
            .filter_map(|marker| rest.find(marker))
            .min()
            .unwrap_or(rest.len());
        rest[..end].to_string()
    }

    fn render(select: Select<Dramas>) -> String {
        select.build(DbBackend::Sqlite).to_string()
    }

    fn query(filter: DramaFilter, sort: DramaSort, page: i64, limit: i64) -> DramaListQuery {
        DramaListQuery {
            filter,
            sort,
            window: Pagination::new(Some(page), Some(limit), 10, 100),
        }
    }

    #[test]
    fn test_count_and_page_share_predicates() {
        let filter = DramaFilter {
            q: Some("Gob".to_string()),
            genre: Some(GenreRef::Id(3)),
            status: Some(DramaStatus::Ongoing),
        };

        for page in [1, 2, 7] {
            let q = query(filter.clone(), DramaSort::Rating, page, 2);
            let page_sql = render(q.page_select());
            let count_sql = render(q.count_select());

            assert_eq!(where_clause(&page_sql), where_clause(&count_sql));
            assert!(!count_sql.contains("ORDER BY"));
            assert!(!count_sql.contains("LIMIT"));
        }
    }

    #[test]
    fn test_no_filters_has_no_where() {
        let q = query(DramaFilter::default(), DramaSort::Latest, 1, 10);
        let sql = render(q.page_select());
        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(sql.contains(r#"ORDER BY "dramas"."created_at" DESC, "dramas"."id" DESC"#), "{sql}");
        assert!(sql.contains("LIMIT 10"), "{sql}");
    }

    #[test]
    fn test_sort_keys_render_expected_order() {
        let cases = [
            (DramaSort::Popular, r#""dramas"."view_count" DESC"#),
            (DramaSort::Rating, r#""dramas"."rating" DESC"#),
            (DramaSort::Oldest, r#""dramas"."created_at" ASC"#),
            (DramaSort::Latest, r#""dramas"."created_at" DESC"#),
        ];
        for (sort, expected) in cases {
            let sql = render(query(DramaFilter::default(), sort, 1, 10).page_select());
            assert!(sql.contains(expected), "{sort:?}: {sql}");
        }
    }

    #[test]
    fn test_offset_follows_page() {
        let sql = render(query(DramaFilter::default(), DramaSort::Latest, 3, 5).page_select());
        assert!(sql.contains("LIMIT 5 OFFSET 10"), "{sql}");
    }

    #[test]
    fn test_title_search_is_escaped_and_lowercased() {
        let filter = DramaFilter {
            q: Some("100%_Love".to_string()),
            ..Default::default()
        };
        let sql = render(query(filter, DramaSort::Latest, 1, 10).count_select());
        assert!(sql.contains("LOWER"), "{sql}");
        assert!(sql.contains("love"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%_x"), r"100\%\_x");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = DramaFilter {
            q: Some("   ".to_string()),
            ..Default::default()
        };
        let sql = render(query(filter, DramaSort::Latest, 1, 10).count_select());
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn test_genre_by_slug_joins_genres() {
        let filter = DramaFilter {
            genre: GenreRef::parse("Fantasy"),
            ..Default::default()
        };
        let sql = render(query(filter, DramaSort::Latest, 1, 10).count_select());
        assert!(sql.contains(r#"INNER JOIN "genres""#), "{sql}");
        assert!(sql.contains("'fantasy'"), "{sql}");
    }

    #[test]
    fn test_genre_ref_parse() {
        assert_eq!(GenreRef::parse("12"), Some(GenreRef::Id(12)));
        assert_eq!(
            GenreRef::parse(" romance "),
            Some(GenreRef::Slug("romance".to_string()))
        );
        assert_eq!(GenreRef::parse(""), None);
    }
}
