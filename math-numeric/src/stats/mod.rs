//! Moments and covariance
//!
//! - [`moments`]: mean, variance, standard deviation, standard scores
//! - [`cov`]: covariance and correlation between the columns of a data matrix
//! - `reduce`: row-wise and column-wise application shared by both

pub mod cov;
pub mod moments;
mod reduce;

pub use cov::{corrcoef, corrcoef_pair, cov, cov_pair};
pub use moments::{Welford, mean, std, varc, welford, zscore};
