pub mod snapshot_sink;
