/*!

This is the long-form manual for `ahp_priorities` and `pwtab`.

## Judgments

A judgment compares two alternatives, from the point of view of the first one:

| Symbol | Meaning                        | Code | Ratio (default scale) |
|--------|--------------------------------|------|-----------------------|
| `E`    | equally important              | 1    | 1                     |
| `>`    | moderately more important      | -1   | 3                     |
| `>>`   | strongly more important        | -2   | 9                     |
| `<`    | moderately less important      | -3   | 1/3                   |
| `<<`   | strongly less important        | -4   | 1/9                   |
| number | direct ratio                   | -    | the number            |
| empty  | no judgment                    | 0    | 0                     |

The lowercase `e` is also accepted. The ratios of `>` and `>>` are set with the
`moderate` and `strong` parameters of the scale.

Only one direction of a pair needs to be entered: `A > B` also records `B < A`.
Entering `B > A` afterwards replaces both.

Numbers are read through the code column first: `-1` is the same as `>`, `1`
the same as `E` and `0` means no judgment. Any other number is a direct ratio,
so `7` means "seven times as important" and `0.5` means "half as important".
Direct ratios should be positive. Infinite and NaN values are rejected.

Comparing an alternative with itself writes the inverse of the judgment on the
diagonal, since the mirror cell is written last.

## Priorities

The priorities of a user are the components of the dominant eigenvector of
the user's matrix of ratios, scaled so that the most important alternative
has a priority of 1. The ratio between two priorities is the relative importance
of the two alternatives.

The pairs without judgment count as 0 in the matrix. Users do not need to
compare all the pairs, but the priorities are more meaningful when they do.

## Groups

The judgments of the members of a group are merged pair by pair, with the
geometric mean of the judgments that were actually made. The priorities of the
group are then computed as for a single user.

## Input workbook

`pwtab` reads an Excel workbook (`.xlsx`):

* every sheet is the judgments of one user, named after the sheet
* each row with three cells `alternative | judgment | alternative` is one
  judgment; the other rows (titles, notes) are skipped
* the sheet called `info` (the name can be changed) describes the groups: the
  first column holds the user names, every other column is a group attribute
  whose name is in the first row

Example of `info` sheet:

| User  | Gender | Site  |
|-------|--------|-------|
| Percy | M      | north |
| Ann   | F      | north |

## Configuration

The configuration file is in JSON format. Only `inputFile` is required.

```json
{
  "inputFile": "Jobs.xlsx",
  "infoSheetName": "info",
  "outputFile": "Jobs_priorities.json",
  "scale": { "moderate": 3, "strong": 9 },
  "convergence": { "tolerance": 1e-8, "maxIterations": 10000 }
}
```

The relative paths are relative to the directory of the configuration file. All
the options can also be passed on the command line (`pwtab --help`).

## Output

```json
{
  "alternatives": ["A", "B", "C"],
  "users": ["Percy"],
  "userScores": { "Percy": [1.0, 0.333, 0.333] },
  "groups": { "Gender": { "M": ["Percy"] } },
  "groupScores": { "Gender": { "M": [1.0, 0.333, 0.333] } }
}
```

*/
