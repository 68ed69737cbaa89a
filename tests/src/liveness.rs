mod integration;
mod registry;
