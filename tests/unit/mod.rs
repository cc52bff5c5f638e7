//! Property and scenario tests over the template engine.

mod diff_properties;
mod graph_properties;
mod round_trip;
mod scenarios;
mod strategies;
