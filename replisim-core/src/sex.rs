#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, std::hash::Hash)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn is_male(self) -> bool {
        self == Sex::Male
    }

    pub fn is_female(self) -> bool {
        self == Sex::Female
    }
}
