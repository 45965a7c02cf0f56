pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod interval {
        pub mod intervalerror;
        pub mod integerinterval;
        pub mod doubleinterval;
        pub mod observableinterval;
    }
}
