pub trait Based {
    type Base;
    fn base(&self) -> &Self::Base;
}
