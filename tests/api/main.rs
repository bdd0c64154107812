mod postgres;
mod roles;
