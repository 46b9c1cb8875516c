//! Grover search over a synthetic friend directory.
//!
//! A [`Directory`] of 1024 friends maps each name to a 10-bit index. The
//! [`SearchDriver`] marks that index with a phase oracle, amplifies it with
//! six Grover iterations on a 10-qubit register and samples the result on a
//! [`Backend`](qff_hal::Backend). The outcome can be summarized as a
//! [`SearchReport`], charted as a PNG and drawn as a text diagram.
//!
//! ```text
//!   name ──► Directory ──► TargetIndex ──► grover_circuit ──► transpile
//!                                                                │
//!   SearchReport ◄── top_k ◄── Counts ◄── Backend::submit/wait ◄─┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use qff_finder::{Directory, FinderConfig, SearchDriver, SearchReport};
//!
//! # async fn demo() -> qff_finder::FinderResult<()> {
//! let config = FinderConfig::default();
//! let driver = SearchDriver::with_simulator(config.search.clone());
//! let directory = Directory::random();
//!
//! let outcome = driver.run(&directory, "Friend_5").await?;
//! let report = SearchReport::from_outcome(&outcome, config.search.top_k);
//! assert_eq!(report.target_bin, "0000000101");
//! # Ok(())
//! # }
//! ```

pub mod circuits;
pub mod config;
pub mod directory;
pub mod drawing;
pub mod driver;
pub mod error;
pub mod plot;
pub mod report;
pub mod target;

pub use circuits::{apply_diffuser, apply_oracle, grover_circuit};
pub use config::{ConfigError, DashboardConfig, FinderConfig, LoggingConfig, SearchConfig};
pub use directory::{Directory, Friend, friend_name};
pub use drawing::{DEFAULT_FOLD, draw_circuit};
pub use driver::{SearchDriver, SearchOutcome};
pub use error::{FinderError, FinderResult};
pub use plot::{HISTOGRAM_FILENAME, render_histogram_png};
pub use report::{DEFAULT_TOP_K, SearchReport, StateCount, top_k};
pub use target::{NUM_QUBITS, SEARCH_SPACE, TargetIndex};
