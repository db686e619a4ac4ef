//! This covers the TCP probing strategy.  Right now the only one is a full
//! open connect, which needs no special privileges.

pub mod full_open;
