//! Concrete repository implementations.

pub mod member;
pub mod seat;

pub use member::MemberRepository;
pub use seat::SeatRepository;
