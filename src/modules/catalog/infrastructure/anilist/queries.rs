//! AniList GraphQL queries
//!
//! Every query reads one `Page`, so a batch of ids or a text search is always a
//! single round trip.

macro_rules! media_fields {
    () => {
        r#"
      id
      type
      format
      title { romaji english native }
      synonyms
      description(asHtml: false)
      popularity
      isAdult
      coverImage { extraLarge large medium }
      relations {
        edges {
          relationType
          node { id }
        }
      }
      characters(sort: [ROLE, RELEVANCE, ID]) {
        edges {
          role
          node { id }
        }
      }
"#
    };
}

macro_rules! character_fields {
    () => {
        r#"
      id
      name { full native alternative }
      description(asHtml: false)
      gender
      age
      favourites
      image { large medium }
      media(sort: POPULARITY_DESC) {
        edges {
          characterRole
          node { id }
        }
      }
"#
    };
}

/// Media batch lookup, `$ids` are numeric AniList ids
pub const MEDIA_BY_IDS_QUERY: &str = concat!(
    "query ($ids: [Int], $perPage: Int) {\n  Page(page: 1, perPage: $perPage) {\n    media(id_in: $ids) {",
    media_fields!(),
    "    }\n  }\n}\n"
);

/// Character batch lookup
pub const CHARACTERS_BY_IDS_QUERY: &str = concat!(
    "query ($ids: [Int], $perPage: Int) {\n  Page(page: 1, perPage: $perPage) {\n    characters(id_in: $ids) {",
    character_fields!(),
    "    }\n  }\n}\n"
);

/// Media text search, optionally restricted by `$type`
pub const MEDIA_SEARCH_QUERY: &str = concat!(
    "query ($search: String, $type: MediaType, $perPage: Int) {\n  Page(page: 1, perPage: $perPage) {\n    media(search: $search, type: $type, sort: SEARCH_MATCH) {",
    media_fields!(),
    "    }\n  }\n}\n"
);

/// Character text search
pub const CHARACTER_SEARCH_QUERY: &str = concat!(
    "query ($search: String, $perPage: Int) {\n  Page(page: 1, perPage: $perPage) {\n    characters(search: $search, sort: SEARCH_MATCH) {",
    character_fields!(),
    "    }\n  }\n}\n"
);
