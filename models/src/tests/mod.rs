mod datasource;
mod project;
