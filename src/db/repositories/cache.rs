use std::collections::HashMap;

use crate::db::codec;
use crate::entities::{cached_movies, cached_shows, prelude::*};
use crate::models::media::{Genre, Movie, Show};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn map_movie(model: cached_movies::Model) -> Result<Movie> {
        Ok(Movie {
            id: model.id,
            title: model.title,
            overview: model.overview,
            poster_path: model.poster_path,
            backdrop_path: model.backdrop_path,
            release_date: model.release_date,
            vote_average: model.vote_average,
            genre_ids: codec::decode_list(
                "cached_movies",
                "genre_ids",
                model.genre_ids.as_deref(),
            )?,
            genres: codec::decode_opt_list::<Genre>(
                "cached_movies",
                "genres",
                model.genres.as_deref(),
            )?,
        })
    }

    pub(crate) fn map_show(model: cached_shows::Model) -> Result<Show> {
        Ok(Show {
            id: model.id,
            name: model.name,
            overview: model.overview,
            poster_path: model.poster_path,
            backdrop_path: model.backdrop_path,
            first_air_date: model.first_air_date,
            vote_average: model.vote_average,
            genre_ids: codec::decode_list("cached_shows", "genre_ids", model.genre_ids.as_deref())?,
            genres: codec::decode_opt_list::<Genre>(
                "cached_shows",
                "genres",
                model.genres.as_deref(),
            )?,
            number_of_seasons: model.number_of_seasons,
            number_of_episodes: model.number_of_episodes,
        })
    }

    pub async fn set_movie(&self, movie: &Movie) -> Result<()> {
        let active_model = cached_movies::ActiveModel {
            id: Set(movie.id),
            title: Set(movie.title.clone()),
            overview: Set(movie.overview.clone()),
            poster_path: Set(movie.poster_path.clone()),
            backdrop_path: Set(movie.backdrop_path.clone()),
            release_date: Set(movie.release_date.clone()),
            vote_average: Set(movie.vote_average),
            genre_ids: Set(Some(codec::encode_list(&movie.genre_ids)?)),
            genres: Set(codec::encode_opt_list(movie.genres.as_deref())?),
        };

        CachedMovies::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(cached_movies::Column::Id)
                    .update_columns([
                        cached_movies::Column::Title,
                        cached_movies::Column::Overview,
                        cached_movies::Column::PosterPath,
                        cached_movies::Column::BackdropPath,
                        cached_movies::Column::ReleaseDate,
                        cached_movies::Column::VoteAverage,
                        cached_movies::Column::GenreIds,
                        cached_movies::Column::Genres,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn set_show(&self, show: &Show) -> Result<()> {
        let active_model = cached_shows::ActiveModel {
            id: Set(show.id),
            name: Set(show.name.clone()),
            overview: Set(show.overview.clone()),
            poster_path: Set(show.poster_path.clone()),
            backdrop_path: Set(show.backdrop_path.clone()),
            first_air_date: Set(show.first_air_date.clone()),
            vote_average: Set(show.vote_average),
            genre_ids: Set(Some(codec::encode_list(&show.genre_ids)?)),
            genres: Set(codec::encode_opt_list(show.genres.as_deref())?),
            number_of_seasons: Set(show.number_of_seasons),
            number_of_episodes: Set(show.number_of_episodes),
        };

        CachedShows::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(cached_shows::Column::Id)
                    .update_columns([
                        cached_shows::Column::Name,
                        cached_shows::Column::Overview,
                        cached_shows::Column::PosterPath,
                        cached_shows::Column::BackdropPath,
                        cached_shows::Column::FirstAirDate,
                        cached_shows::Column::VoteAverage,
                        cached_shows::Column::GenreIds,
                        cached_shows::Column::Genres,
                        cached_shows::Column::NumberOfSeasons,
                        cached_shows::Column::NumberOfEpisodes,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get_movie(&self, id: i64) -> Result<Option<Movie>> {
        let row = CachedMovies::find_by_id(id).one(&self.conn).await?;
        row.map(Self::map_movie).transpose()
    }

    pub async fn get_show(&self, id: i64) -> Result<Option<Show>> {
        let row = CachedShows::find_by_id(id).one(&self.conn).await?;
        row.map(Self::map_show).transpose()
    }

    /// Batch lookup for the watchlist join.
    pub async fn movies_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Movie>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CachedMovies::find()
            .filter(cached_movies::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|m| Ok((m.id, Self::map_movie(m)?)))
            .collect()
    }

    pub async fn shows_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Show>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CachedShows::find()
            .filter(cached_shows::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|m| Ok((m.id, Self::map_show(m)?)))
            .collect()
    }
}
