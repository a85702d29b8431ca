//! Evidence-gathering pipeline stages.
//!
//! Stages run strictly in sequence for one claim: [`planner`] derives the
//! queries, [`dispatch`] runs the search strategies (and the fallback
//! probes), [`select`] ranks the candidates by domain trust, and
//! [`evidence`] fetches and cleans the selected pages.

pub mod dispatch;
pub mod evidence;
pub mod planner;
pub mod select;
