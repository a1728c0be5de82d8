use marquee_model::Movie;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Raw `/discover/movie` result. TMDB sends `null` for several of these, so
/// everything except the id is optional until
/// [`DiscoverMovieItem::into_movie`].
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverMovieItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl DiscoverMovieItem {
    pub fn into_movie(self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.unwrap_or_default(),
            overview: self.overview,
            release_date: self.release_date,
            original_language: self.original_language.unwrap_or_default(),
            vote_average: self.vote_average,
            vote_count: self.vote_count.unwrap_or_default(),
            popularity: self.popularity,
            genre_ids: self.genre_ids.unwrap_or_default(),
            poster_path: self.poster_path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverMovieQuery<'a> {
    pub api_key: &'a str,
    pub language: &'a str,
    pub sort_by: &'a str,
    pub page: u32,
    #[serde(rename = "vote_count.gte")]
    pub min_vote_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_payload_normalizes_nulls_and_missing_fields() {
        let raw = r#"{
            "page": 2,
            "total_pages": 10,
            "total_results": 200,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "overview": null,
                    "release_date": "1999-03-30",
                    "original_language": "en",
                    "vote_average": 8.2,
                    "vote_count": 25000,
                    "popularity": 80.5,
                    "genre_ids": [28, 878],
                    "poster_path": "/matrix.jpg",
                    "adult": false
                },
                { "id": 7, "title": null, "release_date": "" }
            ]
        }"#;

        let page: DiscoverPage<DiscoverMovieItem> =
            serde_json::from_str(raw).expect("valid payload");
        assert_eq!(page.page, 2);

        let movies: Vec<Movie> = page
            .results
            .into_iter()
            .map(DiscoverMovieItem::into_movie)
            .collect();

        assert_eq!(movies[0].title, "The Matrix");
        assert_eq!(movies[0].genre_ids, vec![28, 878]);
        assert_eq!(movies[0].vote_average, Some(8.2));
        assert_eq!(movies[0].overview, None);

        assert_eq!(movies[1].title, "");
        assert!(movies[1].genre_ids.is_empty());
        assert_eq!(movies[1].vote_average, None);
        assert_eq!(movies[1].vote_count, 0);
        assert_eq!(movies[1].known_release_date(), None);
    }

    #[test]
    fn query_uses_tmdb_parameter_names() {
        let query = DiscoverMovieQuery {
            api_key: "key",
            language: "en-US",
            sort_by: "popularity.desc",
            page: 3,
            min_vote_count: 50,
        };
        let encoded = serde_json::to_value(&query).expect("serializable");
        assert_eq!(encoded["vote_count.gte"], 50);
        assert_eq!(encoded["sort_by"], "popularity.desc");
    }
}
