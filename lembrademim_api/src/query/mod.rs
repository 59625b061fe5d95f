mod common;
pub use self::common::Query;

mod biography;
pub use self::biography::BiographySearch;

mod association;
pub use self::association::AssociationQuery;
