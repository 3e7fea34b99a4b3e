mod connect;
mod dashboard;
