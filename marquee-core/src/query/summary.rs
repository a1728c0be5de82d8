//! Summary statistics over a filtered page of movies.

use std::collections::HashMap;

use marquee_model::{
    GenreSummary, Movie, MoviesSummary, TopRatedMovie, genre_name,
};

use super::sort::{SortField, SortOrder, SortSpec, sort_movies_by};

/// Size of the top-rated ranking returned by the summary endpoint.
pub const DEFAULT_TOP_N: usize = 5;

/// Genre buckets in first-seen order.
#[derive(Debug, Default)]
struct GenreBuckets {
    order: Vec<GenreBucket>,
    index: HashMap<u32, usize>,
}

#[derive(Debug)]
struct GenreBucket {
    genre_id: u32,
    count: usize,
    ratings: Vec<f64>,
}

impl GenreBuckets {
    fn from_movies(movies: &[Movie]) -> Self {
        let mut buckets = Self::default();
        for movie in movies {
            for genre_id in &movie.genre_ids {
                let bucket = buckets.entry(*genre_id);
                bucket.count += 1;
                if let Some(rating) = movie.vote_average {
                    bucket.ratings.push(rating);
                }
            }
        }
        buckets
    }

    fn entry(&mut self, genre_id: u32) -> &mut GenreBucket {
        let position = match self.index.get(&genre_id) {
            Some(position) => *position,
            None => {
                self.order.push(GenreBucket {
                    genre_id,
                    count: 0,
                    ratings: Vec::new(),
                });
                let position = self.order.len() - 1;
                self.index.insert(genre_id, position);
                position
            }
        };
        &mut self.order[position]
    }

    fn into_summaries(self) -> Vec<GenreSummary> {
        self.order
            .into_iter()
            .map(|bucket| GenreSummary {
                genre_id: bucket.genre_id,
                genre_name: genre_name(bucket.genre_id).into_owned(),
                count: bucket.count,
                avg_rating: rounded_mean(&bucket.ratings),
            })
            .collect()
    }
}

/// Two decimals, exact half cents rounded to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn rounded_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// Highest rated movies first, ties in input order, at most `top_n`.
pub fn top_rated(movies: &[Movie], top_n: usize) -> Vec<TopRatedMovie> {
    let spec = SortSpec::new(SortField::Rating, SortOrder::Descending);
    sort_movies_by(movies, spec)
        .iter()
        .take(top_n)
        .map(TopRatedMovie::from)
        .collect()
}

/// Totals, per-genre statistics and the top-rated ranking for `movies`.
///
/// Movies without a rating count toward totals and genre counts but are left
/// out of every average.
pub fn summarize(movies: &[Movie], top_n: usize) -> MoviesSummary {
    if movies.is_empty() {
        return MoviesSummary::empty();
    }

    let ratings: Vec<f64> =
        movies.iter().filter_map(|movie| movie.vote_average).collect();

    MoviesSummary {
        total_movies: movies.len(),
        overall_avg_rating: rounded_mean(&ratings),
        genres: GenreBuckets::from_movies(movies).into_summaries(),
        top_rated: top_rated(movies, top_n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(
        id: u64,
        title: &str,
        rating: Option<f64>,
        genre_ids: &[u32],
    ) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            vote_average: rating,
            vote_count: id * 100,
            release_date: Some(format!("2020-01-{id:02}")),
            genre_ids: genre_ids.to_vec(),
            ..Movie::default()
        }
    }

    fn genre(summary: &MoviesSummary, genre_id: u32) -> &GenreSummary {
        summary
            .genres
            .iter()
            .find(|g| g.genre_id == genre_id)
            .unwrap_or_else(|| panic!("genre {genre_id} missing"))
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        assert_eq!(summarize(&[], DEFAULT_TOP_N), MoviesSummary::empty());
        let empty = summarize(&[], 5);
        assert_eq!(empty.total_movies, 0);
        assert_eq!(empty.overall_avg_rating, 0.0);
        assert!(empty.genres.is_empty());
        assert!(empty.top_rated.is_empty());
    }

    #[test]
    fn two_movie_scenario() {
        let movies = vec![
            movie(1, "A", Some(7.0), &[28]),
            movie(2, "B", Some(9.0), &[28, 12]),
        ];
        let summary = summarize(&movies, DEFAULT_TOP_N);

        assert_eq!(summary.total_movies, 2);
        assert_eq!(summary.overall_avg_rating, 8.0);

        let action = genre(&summary, 28);
        assert_eq!(action.genre_name, "Action");
        assert_eq!(action.count, 2);
        assert_eq!(action.avg_rating, 8.0);

        let adventure = genre(&summary, 12);
        assert_eq!(adventure.genre_name, "Adventure");
        assert_eq!(adventure.count, 1);
        assert_eq!(adventure.avg_rating, 9.0);

        let titles: Vec<&str> =
            summary.top_rated.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn unrated_movies_count_but_do_not_average() {
        let movies = vec![
            movie(1, "A", None, &[18]),
            movie(2, "B", Some(6.0), &[18]),
            movie(3, "C", None, &[27]),
        ];
        let summary = summarize(&movies, DEFAULT_TOP_N);

        assert_eq!(summary.total_movies, 3);
        assert_eq!(summary.overall_avg_rating, 6.0);

        let drama = genre(&summary, 18);
        assert_eq!(drama.count, 2);
        assert_eq!(drama.avg_rating, 6.0);

        let horror = genre(&summary, 27);
        assert_eq!(horror.count, 1);
        assert_eq!(horror.avg_rating, 0.0);
    }

    #[test]
    fn no_ratings_at_all_gives_zero_overall_average() {
        let movies = vec![movie(1, "A", None, &[]), movie(2, "B", None, &[])];
        let summary = summarize(&movies, DEFAULT_TOP_N);
        assert_eq!(summary.total_movies, 2);
        assert_eq!(summary.overall_avg_rating, 0.0);
        assert!(summary.genres.is_empty());
    }

    #[test]
    fn genres_follow_first_seen_order() {
        let movies = vec![
            movie(1, "A", Some(5.0), &[878, 28]),
            movie(2, "B", Some(6.0), &[12, 878]),
            movie(3, "C", Some(7.0), &[99]),
        ];
        let order: Vec<u32> = summarize(&movies, DEFAULT_TOP_N)
            .genres
            .iter()
            .map(|g| g.genre_id)
            .collect();
        assert_eq!(order, vec![878, 28, 12, 99]);
        assert_eq!(
            genre(&summarize(&movies, DEFAULT_TOP_N), 99).genre_name,
            "Genre 99"
        );
    }

    #[test]
    fn averages_round_to_two_decimals() {
        let movies = vec![
            movie(1, "A", Some(7.0), &[35]),
            movie(2, "B", Some(8.0), &[35]),
            movie(3, "C", Some(8.0), &[35]),
        ];
        let summary = summarize(&movies, DEFAULT_TOP_N);
        assert_eq!(summary.overall_avg_rating, 7.67);
        assert_eq!(genre(&summary, 35).avg_rating, 7.67);
    }

    #[test]
    fn half_cent_averages_round_to_even() {
        let movies = vec![
            movie(1, "A", Some(8.0), &[28]),
            movie(2, "B", Some(6.25), &[28]),
        ];
        let summary = summarize(&movies, DEFAULT_TOP_N);
        assert_eq!(summary.overall_avg_rating, 7.12);
        assert_eq!(genre(&summary, 28).avg_rating, 7.12);

        assert_eq!(round2(6.375), 6.38);
        assert_eq!(round2(7.625), 7.62);
        assert_eq!(round2(-7.125), -7.12);
    }

    #[test]
    fn top_rated_is_truncated_sorted_and_stable() {
        let movies = vec![
            movie(1, "A", Some(6.0), &[]),
            movie(2, "B", Some(9.0), &[]),
            movie(3, "C", None, &[]),
            movie(4, "D", Some(9.0), &[]),
            movie(5, "E", Some(6.0), &[]),
            movie(6, "F", Some(7.5), &[]),
            movie(7, "G", Some(6.0), &[]),
        ];
        let summary = summarize(&movies, DEFAULT_TOP_N);
        let ids: Vec<u64> = summary.top_rated.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4, 6, 1, 5]);

        let top = &summary.top_rated[0];
        assert_eq!(top.title, "B");
        assert_eq!(top.vote_average, Some(9.0));
        assert_eq!(top.vote_count, 200);
        assert_eq!(top.release_date.as_deref(), Some("2020-01-02"));
    }

    #[test]
    fn top_rated_returns_everything_when_short() {
        let movies =
            vec![movie(1, "A", Some(6.0), &[]), movie(2, "B", None, &[])];
        let ids: Vec<u64> =
            top_rated(&movies, DEFAULT_TOP_N).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
