mod controller;
mod naming;
mod scan;
