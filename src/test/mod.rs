mod analyzers;
mod metrics;
