//! The first plot in the thread.

use crate::errors::ChainError;
use crate::plot::Plot;

/// JSON literal of the genesis plot. Process-wide configuration, injected at
/// startup wherever a starting point is needed.
pub const GENESIS_PLOT_JSON: &str = r#"
{
    "header": {
        "previous": "0000000000000000000000000000000000000000000000000000000000000000",
        "hash_list_root": "68e2aa7b59fc4ddffe9db61cbfb6b5e50dba5bf29aefd85654b70f2cc5a4c36c",
        "time": 1711304392,
        "target": "0000000ffff00000000000000000000000000000000000000000000000000000",
        "thread_work": "0000000000000000000000000000000000000000000000000000000010001000",
        "nonce": 6678200133003797,
        "height": 0,
        "interaction_count": 1
    },
    "interactions": [
        {
            "time": 1711304122,
            "nonce": 587592816,
            "from": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=",
            "to": "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZY=",
            "memo": "...unless a grain of wheat falls into the earth and dies, it remains alone. But if it dies, it produces much grain and yields a harvest.",
            "series": 1
        }
    ]
}"#;

/// Parses the genesis literal.
pub fn genesis_plot() -> Result<Plot, ChainError> {
    Ok(serde_json::from_str(GENESIS_PLOT_JSON)?)
}
