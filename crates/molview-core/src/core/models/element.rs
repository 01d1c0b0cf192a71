use phf::{Map, phf_map};

#[rustfmt::skip]
pub static ELEMENT_NAMES: Map<&'static str, &'static str> = phf_map! {
    // --- Period 1 ---
    "H" => "Hydrogen", "He" => "Helium",

    // --- Period 2 ---
    "Li" => "Lithium", "Be" => "Beryllium", "B" => "Boron", "C" => "Carbon",
    "N" => "Nitrogen", "O" => "Oxygen", "F" => "Fluorine", "Ne" => "Neon",

    // --- Period 3 ---
    "Na" => "Sodium", "Mg" => "Magnesium", "Al" => "Aluminium", "Si" => "Silicon",
    "P" => "Phosphorus", "S" => "Sulfur", "Cl" => "Chlorine", "Ar" => "Argon",

    // --- Period 4 ---
    "K" => "Potassium", "Ca" => "Calcium", "Sc" => "Scandium", "Ti" => "Titanium",
    "V" => "Vanadium", "Cr" => "Chromium", "Mn" => "Manganese", "Fe" => "Iron",
    "Co" => "Cobalt", "Ni" => "Nickel", "Cu" => "Copper", "Zn" => "Zinc",
    "Ga" => "Gallium", "Ge" => "Germanium", "As" => "Arsenic", "Se" => "Selenium",
    "Br" => "Bromine", "Kr" => "Krypton",

    // --- Period 5 ---
    "Rb" => "Rubidium", "Sr" => "Strontium", "Y" => "Yttrium", "Zr" => "Zirconium",
    "Nb" => "Niobium", "Mo" => "Molybdenum", "Tc" => "Technetium", "Ru" => "Ruthenium",
    "Rh" => "Rhodium", "Pd" => "Palladium", "Ag" => "Silver", "Cd" => "Cadmium",
    "In" => "Indium", "Sn" => "Tin", "Sb" => "Antimony", "Te" => "Tellurium",
    "I" => "Iodine", "Xe" => "Xenon",

    // --- Period 6 ---
    "Cs" => "Caesium", "Ba" => "Barium", "La" => "Lanthanum", "Ce" => "Cerium",
    "Pr" => "Praseodymium", "Nd" => "Neodymium", "Pm" => "Promethium", "Sm" => "Samarium",
    "Eu" => "Europium", "Gd" => "Gadolinium", "Tb" => "Terbium", "Dy" => "Dysprosium",
    "Ho" => "Holmium", "Er" => "Erbium", "Tm" => "Thulium", "Yb" => "Ytterbium",
    "Lu" => "Lutetium", "Hf" => "Hafnium", "Ta" => "Tantalum", "W" => "Tungsten",
    "Re" => "Rhenium", "Os" => "Osmium", "Ir" => "Iridium", "Pt" => "Platinum",
    "Au" => "Gold", "Hg" => "Mercury", "Tl" => "Thallium", "Pb" => "Lead",
    "Bi" => "Bismuth", "Po" => "Polonium", "At" => "Astatine", "Rn" => "Radon",

    // --- Period 7 ---
    "Fr" => "Francium", "Ra" => "Radium", "Ac" => "Actinium", "Th" => "Thorium",
    "Pa" => "Protactinium", "U" => "Uranium", "Np" => "Neptunium", "Pu" => "Plutonium",
    "Am" => "Americium", "Cm" => "Curium", "Bk" => "Berkelium", "Cf" => "Californium",
    "Es" => "Einsteinium", "Fm" => "Fermium", "Md" => "Mendelevium", "No" => "Nobelium",
    "Lr" => "Lawrencium", "Rf" => "Rutherfordium", "Db" => "Dubnium", "Sg" => "Seaborgium",
    "Bh" => "Bohrium", "Hs" => "Hassium", "Mt" => "Meitnerium", "Ds" => "Darmstadtium",
    "Rg" => "Roentgenium", "Cn" => "Copernicium", "Nh" => "Nihonium", "Fl" => "Flerovium",
    "Mc" => "Moscovium", "Lv" => "Livermorium", "Ts" => "Tennessine", "Og" => "Oganesson",
};

/// Looks up the full element name for a symbol such as `"C"` or `"Cl"`.
///
/// The lookup is case-sensitive, matching the conventional capitalization of
/// element symbols.
pub fn element_name(symbol: &str) -> Option<&'static str> {
    ELEMENT_NAMES.get(symbol).copied()
}
