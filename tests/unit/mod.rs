mod access;
mod auth;
mod cache;
mod comment;
mod filters;
mod pagination;
mod project;
mod resolver;
mod task;
mod team;
