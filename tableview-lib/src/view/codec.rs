//! Conversion between [`QueryParams`] and [`ViewState`].
//!
//! Malformed values never fail: they fall back to the defaults (page 0, no
//! sort, ascending).

use crate::query::QueryParams;
use crate::query::QueryPatch;

use super::ColumnSort;
use super::Direction;
use super::ViewState;

/// Parameter holding the zero-based page index.
pub const PAGE_PARAM: &str = "page";
/// Parameter holding the sorted column id.
pub const SORT_PARAM: &str = "sort";
/// Parameter holding the sort direction.
pub const DIRECTION_PARAM: &str = "direction";

/// Decodes a view state from persisted parameters.
pub fn decode(params: &QueryParams) -> ViewState {
    let page_index = params
        .get(PAGE_PARAM)
        .and_then(|p| p.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let sort = params
        .get(SORT_PARAM)
        .filter(|column| !column.is_empty())
        .map(|column| ColumnSort {
            column: column.to_string(),
            direction: params
                .get(DIRECTION_PARAM)
                .map(Direction::from_param)
                .unwrap_or_default(),
        });

    ViewState { page_index, sort }
}

/// Builds the patch that writes `state` into a store.
///
/// The page is always written. Without a sort, both sort keys are removed
/// rather than written empty.
pub fn patch(state: &ViewState) -> QueryPatch {
    let patch = QueryPatch::new().set(PAGE_PARAM, state.page_index.to_string());

    match &state.sort {
        Some(sort) => patch
            .set(SORT_PARAM, sort.column.as_str())
            .set(DIRECTION_PARAM, sort.direction.as_str()),
        None => patch.remove(SORT_PARAM).remove(DIRECTION_PARAM),
    }
}

/// Encodes `state` on top of `params`, keeping unrelated keys.
pub fn encode(state: &ViewState, params: &QueryParams) -> QueryParams {
    let mut next = params.clone();
    patch(state).apply(&mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(query: &str) -> ViewState {
        decode(&QueryParams::parse(query))
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_str(""), ViewState::default());
    }

    #[test]
    fn test_decode_full() {
        assert_eq!(
            decode_str("page=4&sort=fuel&direction=desc"),
            ViewState {
                page_index: 4,
                sort: Some(ColumnSort::desc("fuel")),
            }
        );
    }

    #[test]
    fn test_decode_malformed_page() {
        assert_eq!(decode_str("page=abc").page_index, 0);
        assert_eq!(decode_str("page=-2").page_index, 0);
        assert_eq!(decode_str("page=").page_index, 0);
        assert_eq!(decode_str("page=%203%20").page_index, 3);
    }

    #[test]
    fn test_decode_direction_defaults_to_asc() {
        assert_eq!(decode_str("sort=name").sort, Some(ColumnSort::asc("name")));
        assert_eq!(
            decode_str("sort=name&direction=DESC").sort,
            Some(ColumnSort::asc("name"))
        );
    }

    #[test]
    fn test_decode_empty_sort_is_absent() {
        assert_eq!(decode_str("sort=&direction=desc").sort, None);
    }

    #[test]
    fn test_encode_keeps_unrelated_keys() {
        let params = QueryParams::parse("tab=cars&sort=type&direction=desc&page=2");
        let encoded = encode(&ViewState::new(5), &params);
        assert_eq!(encoded.to_query_string(), "tab=cars&page=5");
    }

    #[test]
    fn test_encode_writes_sort() {
        let state = ViewState {
            page_index: 0,
            sort: Some(ColumnSort::asc("name")),
        };
        let encoded = encode(&state, &QueryParams::new());
        assert_eq!(encoded.to_query_string(), "page=0&sort=name&direction=asc");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let inputs = [
            "",
            "page=7",
            "page=x&sort=name",
            "sort=&direction=desc&keep=1",
            "keep=me&page=3&sort=fuel&direction=desc",
            "direction=desc",
            "page=01&sort=id&direction=up",
        ];

        for input in inputs {
            let params = QueryParams::parse(input);
            let state = decode(&params);
            let encoded = encode(&state, &params);

            assert_eq!(decode(&encoded), state, "round trip of {input:?}");
            for (key, value) in params.iter() {
                if ![PAGE_PARAM, SORT_PARAM, DIRECTION_PARAM].contains(&key) {
                    assert_eq!(encoded.get(key), Some(value), "key {key} of {input:?}");
                }
            }
        }
    }
}
