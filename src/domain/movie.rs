//! Movie Context - fabcar 电影示例合约路由

use super::route::{ArgSpec, ResponsePolicy, RouteSpec};

/// 本地生成的电影 key 长度
pub const MOVIE_KEY_LENGTH: usize = 20;

const INSERTED_FIELDS: &[&str] = &["key", "name", "director", "genre", "year"];

pub fn movie_routes() -> Vec<RouteSpec> {
    vec![
        // 合约参数顺序：key, name, director, year, genre
        RouteSpec::post("/insertMovie")
            .submit("createMovie")
            .params(&["name", "director", "genre", "year"])
            .arguments(vec![
                ArgSpec::GeneratedKey {
                    name: "key",
                    len: MOVIE_KEY_LENGTH,
                },
                ArgSpec::Param("name"),
                ArgSpec::Param("director"),
                ArgSpec::Param("year"),
                ArgSpec::Param("genre"),
            ])
            .policy(ResponsePolicy::EchoArguments(INSERTED_FIELDS)),
        RouteSpec::get("/viewAllMovies")
            .evaluate("queryAllMovies")
            .policy(ResponsePolicy::HtmlDocument),
        RouteSpec::post("/queryMoviesByYear")
            .evaluate("queryMoviesByYear")
            .params(&["year"]),
        RouteSpec::post("/queryMoviesByGenre")
            .evaluate("queryMoviesByGenre")
            .params(&["genre"]),
    ]
}
