mod generator;
mod spec;
