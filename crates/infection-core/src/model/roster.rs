/// Infection deck composition at the start of a session.
pub const STANDARD_ROSTER: [(&str, u32); 14] = [
    ("Atlanta", 3),
    ("Buenos Aires", 2),
    ("Cairo", 3),
    ("Chicago", 2),
    ("Denver", 1),
    ("Istanbul", 3),
    ("Jacksonville", 3),
    ("Lagos", 3),
    ("London", 3),
    ("New York", 3),
    ("Santiago", 3),
    ("São Paulo", 3),
    ("Tripoli", 3),
    ("Washington", 3),
];
