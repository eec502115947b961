pub mod city;
pub mod deck;
pub mod roster;
pub mod round;
